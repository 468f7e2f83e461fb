//! Value parsers for command-line arguments.

use sensor_calib::{ImagePoint, ImageSize, ReferenceObject};

/// `credit-card`, `us-letter`, or custom millimetre dimensions `WxH`.
pub fn parse_reference(s: &str) -> Result<ReferenceObject, String> {
    let reference = match s.trim().to_ascii_lowercase().as_str() {
        "credit-card" | "card" => ReferenceObject::CreditCard,
        "us-letter" | "letter" => ReferenceObject::UsLetter,
        other => {
            let (width_mm, height_mm) = parse_pair(other, 'x')
                .map_err(|e| format!("expected credit-card, us-letter or WxH in mm: {e}"))?;
            ReferenceObject::Custom {
                width_mm,
                height_mm,
            }
        }
    };
    reference.validate().map_err(|e| e.to_string())?;
    Ok(reference)
}

/// A normalized corner `x,y`.
pub fn parse_corner(s: &str) -> Result<ImagePoint, String> {
    let (x, y) = parse_pair(s, ',')?;
    Ok(ImagePoint::new(x, y))
}

/// An image size `WxH` in pixels.
pub fn parse_image_size(s: &str) -> Result<ImageSize, String> {
    let (w, h) = parse_pair(&s.to_ascii_lowercase(), 'x')?;
    let size = ImageSize::new(w, h);
    if size.is_valid() {
        Ok(size)
    } else {
        Err(format!("image size must be positive, got {s}"))
    }
}

fn parse_pair(s: &str, sep: char) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected two numbers separated by '{sep}', got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{}': {e}", v.trim()))
    };
    Ok((parse(a)?, parse(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference() {
        assert_eq!(parse_reference("credit-card"), Ok(ReferenceObject::CreditCard));
        assert_eq!(parse_reference("US-Letter"), Ok(ReferenceObject::UsLetter));
        assert_eq!(
            parse_reference("100x50"),
            Ok(ReferenceObject::Custom {
                width_mm: 100.0,
                height_mm: 50.0
            })
        );
        assert!(parse_reference("0x50").is_err());
        assert!(parse_reference("napkin").is_err());
    }

    #[test]
    fn test_corner() {
        assert_eq!(parse_corner("0.25, 0.5"), Ok(ImagePoint::new(0.25, 0.5)));
        assert!(parse_corner("0.25").is_err());
        assert!(parse_corner("a,b").is_err());
    }

    #[test]
    fn test_image_size() {
        assert_eq!(parse_image_size("1920x1440"), Ok(ImageSize::new(1920.0, 1440.0)));
        assert!(parse_image_size("0x10").is_err());
    }
}
