use std::time::Duration;

use crate::target::AnimationTarget;

/// The animation duration declared by the computed style of `el`, zero if it
/// has none or it can't be parsed.
pub fn computed_duration<E: AnimationTarget>(el: &E) -> Duration {
  el.animation_duration()
    .map_or(Duration::ZERO, |value| parse_animation_duration(&value))
}

/// Parse a CSS `animation-duration` value.
///
/// Only the leading number of the first duration of the list is considered, a
/// `ms` unit is honored and everything else is read as seconds. Values that
/// are not a valid non negative number parse to zero.
pub fn parse_animation_duration(value: &str) -> Duration {
  let first = value.split(',').next().unwrap_or_default().trim_start();
  let (number, unit) = first.split_at(number_prefix_len(first));
  let Ok(mut secs) = number.parse::<f64>() else {
    log::trace!("animation duration `{value}` is not a number, use zero.");
    return Duration::ZERO;
  };
  if unit.trim_start().starts_with("ms") {
    secs /= 1000.;
  }

  if secs.is_finite() && secs > 0. {
    Duration::from_micros((secs * 1_000_000.).round() as u64)
  } else {
    Duration::ZERO
  }
}

/// Length of the longest prefix of `s` that looks like a float:
/// `[+-]digits[.digits][e[+-]digits]`.
fn number_prefix_len(s: &str) -> usize {
  let bytes = s.as_bytes();
  let digits = |mut i: usize| {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
      i += 1;
    }
    i
  };

  let mut end = 0;
  if matches!(bytes.first(), Some(b'+' | b'-')) {
    end += 1;
  }
  let int_end = digits(end);
  let mut has_digits = int_end > end;
  end = int_end;
  if bytes.get(end) == Some(&b'.') {
    let frac_end = digits(end + 1);
    if frac_end > end + 1 || has_digits {
      has_digits |= frac_end > end + 1;
      end = frac_end;
    }
  }
  if !has_digits {
    return 0;
  }
  if matches!(bytes.get(end), Some(b'e' | b'E')) {
    let mut exp = end + 1;
    if matches!(bytes.get(exp), Some(b'+' | b'-')) {
      exp += 1;
    }
    let exp_end = digits(exp);
    if exp_end > exp {
      end = exp_end;
    }
  }
  end
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_helper::MockElement;

  #[test]
  fn seconds() {
    assert_eq!(parse_animation_duration("0.3s"), Duration::from_millis(300));
    assert_eq!(parse_animation_duration("2s"), Duration::from_secs(2));
    assert_eq!(parse_animation_duration(".5s"), Duration::from_millis(500));
    assert_eq!(parse_animation_duration("1e-1s"), Duration::from_millis(100));
  }

  #[test]
  fn milliseconds() {
    assert_eq!(parse_animation_duration("300ms"), Duration::from_millis(300));
    assert_eq!(parse_animation_duration("12.5ms"), Duration::from_micros(12_500));
  }

  #[test]
  fn first_of_a_list() {
    assert_eq!(parse_animation_duration("  1.5s, 2s"), Duration::from_millis(1500));
  }

  #[test]
  fn invalid_is_zero() {
    assert_eq!(parse_animation_duration(""), Duration::ZERO);
    assert_eq!(parse_animation_duration("auto"), Duration::ZERO);
    assert_eq!(parse_animation_duration("-1s"), Duration::ZERO);
    assert_eq!(parse_animation_duration("."), Duration::ZERO);
    assert_eq!(parse_animation_duration("s"), Duration::ZERO);
  }

  #[test]
  fn element_without_style() {
    let el = MockElement::new();
    assert_eq!(computed_duration(&el), Duration::ZERO);

    el.set_animation_duration("0.25s");
    assert_eq!(computed_duration(&el), Duration::from_millis(250));
  }
}
