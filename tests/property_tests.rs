//! Property-based tests for imageops-filters
//!
//! These tests use proptest to verify invariants that hold for every
//! input image, independent of the exact pixel values.

use image::Rgb;
use imageops_filters::{
    CancelToken, Filter, FilterKind, GrayscaleFilter, GreyWorldFilter, Image, InvertFilter,
    LinearStretchFilter, MedianFilter, MorphologicalComposite, MorphologyFilter, NoProgress,
    StructuringElement,
};
use proptest::prelude::*;
use std::sync::Mutex;

/// Strategy for generating small but valid image dimensions
fn image_dimensions() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=12, 1u32..=12)
}

/// Strategy for generating RGB pixel values
fn rgb_pixel() -> impl Strategy<Value = Rgb<u8>> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb([r, g, b]))
}

/// Strategy for generating images with arbitrary content
fn rgb_image() -> impl Strategy<Value = Image<Rgb<u8>>> {
    image_dimensions().prop_flat_map(|(width, height)| {
        prop::collection::vec(rgb_pixel(), (width * height) as usize).prop_map(move |pixels| {
            Image::from_fn(width, height, |x, y| pixels[(y * width + x) as usize])
        })
    })
}

/// Strategy for generating images whose pixels are all gray
fn gray_image() -> impl Strategy<Value = Image<Rgb<u8>>> {
    image_dimensions().prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<u8>(), (width * height) as usize).prop_map(move |levels| {
            Image::from_fn(width, height, |x, y| {
                let level = levels[(y * width + x) as usize];
                Rgb([level, level, level])
            })
        })
    })
}

fn run(filter: &dyn Filter, image: &Image<Rgb<u8>>) -> Image<Rgb<u8>> {
    filter
        .process(image, &NoProgress, &CancelToken::new())
        .unwrap()
        .into_image()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_filter_preserves_dimensions(image in rgb_image()) {
        for kind in FilterKind::ALL {
            let filter = kind.build(&image);
            prop_assert_eq!(run(&filter, &image).dimensions(), image.dimensions(), "{}", kind);
        }
    }

    #[test]
    fn progress_is_monotone_and_ends_at_100(image in rgb_image()) {
        let seen = Mutex::new(Vec::new());
        let sink = |percent: u8| seen.lock().unwrap().push(percent);
        InvertFilter.process(&image, &sink, &CancelToken::new()).unwrap();

        let seen = seen.into_inner().unwrap();
        prop_assert_eq!(seen.len() as u32, image.width() + 1);
        prop_assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(seen.last().copied(), Some(100));
    }
}

proptest! {
    #[test]
    fn invert_twice_is_identity(image in rgb_image()) {
        let once = run(&InvertFilter, &image);
        prop_assert_eq!(run(&InvertFilter, &once), image);
    }

    #[test]
    fn grayscale_channels_are_equal(image in rgb_image()) {
        for pixel in run(&GrayscaleFilter, &image).pixels() {
            prop_assert!(pixel[0] == pixel[1] && pixel[1] == pixel[2]);
        }
    }

    #[test]
    fn erosion_below_source_below_dilation(image in rgb_image()) {
        let eroded = run(&MorphologyFilter::erosion(StructuringElement::default()), &image);
        let dilated = run(&MorphologyFilter::dilation(StructuringElement::default()), &image);
        for (x, y, pixel) in image.enumerate_pixels() {
            prop_assert!(eroded.get_pixel(x, y)[0] <= pixel[0]);
            prop_assert!(pixel[0] <= dilated.get_pixel(x, y)[0]);
        }
    }

    #[test]
    fn opening_below_source_below_closing(image in gray_image(), radius in 1u32..=2) {
        let element = StructuringElement::square(radius);
        let opened = run(&MorphologicalComposite::opening(element.clone()), &image);
        let closed = run(&MorphologicalComposite::closing(element), &image);
        for (x, y, pixel) in image.enumerate_pixels() {
            prop_assert!(opened.get_pixel(x, y)[0] <= pixel[0]);
            prop_assert!(pixel[0] <= closed.get_pixel(x, y)[0]);
        }
    }

    #[test]
    fn top_hat_is_source_minus_opening(image in rgb_image()) {
        let element = StructuringElement::square(1);
        let opened = run(&MorphologicalComposite::opening(element.clone()), &image);
        let top_hat = run(&MorphologicalComposite::top_hat(element), &image);
        for (x, y, pixel) in image.enumerate_pixels() {
            let level = opened.get_pixel(x, y)[0];
            let expected = Rgb(pixel.0.map(|c| c.saturating_sub(level)));
            prop_assert_eq!(*top_hat.get_pixel(x, y), expected);
        }
    }

    #[test]
    fn median_output_is_an_input_color(image in rgb_image()) {
        let output = run(&MedianFilter::new(1), &image);
        for pixel in output.pixels() {
            prop_assert!(image.pixels().any(|p| p == pixel));
        }
    }

    #[test]
    fn grey_world_keeps_uniform_gray(level in any::<u8>(), (width, height) in image_dimensions()) {
        let image: Image<Rgb<u8>> = Image::from_pixel(width, height, Rgb([level, level, level]));
        let filter = GreyWorldFilter::new(&image);
        prop_assert_eq!(run(&filter, &image), image);
    }

    #[test]
    fn linear_stretch_reaches_both_ends(image in rgb_image()) {
        let filter = LinearStretchFilter::new(&image);
        let (min, max) = filter.range();
        let output = run(&filter, &image);
        for c in 0..3 {
            if min[c] < max[c] {
                prop_assert_eq!(output.pixels().map(|p| p[c]).min(), Some(0));
                prop_assert_eq!(output.pixels().map(|p| p[c]).max(), Some(255));
            }
        }
    }
}
