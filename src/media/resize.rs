use std::io::Cursor;

use image::imageops::FilterType;

use crate::error::AppResult;

/// `bound × bound` 상자에 비율을 유지하며 들어가는 크기. 원본보다 키우지 않는다.
pub fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= bound || longest == 0 {
        return (width, height);
    }
    let scale = |side: u32| -> u32 {
        let scaled = (u64::from(side) * u64::from(bound) + u64::from(longest) / 2) / u64::from(longest);
        (scaled as u32).max(1)
    };
    (scale(width), scale(height))
}

/// 입력 이미지를 `size` 상자에 맞춰 줄이고 같은 포맷으로 다시 인코딩한다
pub fn resize_to(bytes: &[u8], size: u32) -> AppResult<Vec<u8>> {
    let format = image::guess_format(bytes)?;
    let img = image::load_from_memory_with_format(bytes, format)?;

    let (w, h) = fit_within(img.width(), img.height(), size);
    let out = if (w, h) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(w, h, FilterType::Lanczos3)
    };

    let mut buf = Cursor::new(Vec::new());
    out.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_fit_within_landscape_and_portrait() {
        assert_eq!(fit_within(1600, 900, 1200), (1200, 675));
        assert_eq!(fit_within(1600, 900, 200), (200, 113));
        assert_eq!(fit_within(900, 1600, 400), (225, 400));
        assert_eq!(fit_within(1000, 1000, 800), (800, 800));
    }

    #[test]
    fn test_fit_within_never_enlarges() {
        assert_eq!(fit_within(300, 120, 1200), (300, 120));
        assert_eq!(fit_within(1200, 10, 1200), (1200, 10));
    }

    #[test]
    fn test_fit_within_keeps_at_least_one_pixel() {
        assert_eq!(fit_within(5000, 1, 200), (200, 1));
    }

    #[test]
    fn test_resize_keeps_format() {
        let out = resize_to(&png(640, 480), 200).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Png);
        let img = image::load_from_memory(&out).unwrap();
        assert_eq!((img.width(), img.height()), (200, 150));
    }

    #[test]
    fn test_resize_rejects_garbage() {
        assert!(resize_to(b"not an image", 200).is_err());
    }
}
