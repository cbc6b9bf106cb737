//! End-to-end scenarios through the public API.

use filterlab_core::color::{merge_channels, split_channels};
use filterlab_core::filters::{gaussian_blur, grayscale, negative, sepia};
use filterlab_core::{
    adjust_brightness, adjust_contrast, adjust_tone, apply_filter, apply_modification, flip,
    reduce, ChannelCount, EditorState, EngineError, Event, FilterKind, FilterSettings, FlipAxis,
    ModificationKind, PixelBuffer, ToneParams,
};

fn white_4x4() -> PixelBuffer {
    PixelBuffer::filled(4, 4, ChannelCount::Three, 255)
}

fn camera_frame() -> PixelBuffer {
    PixelBuffer::from_fn(32, 24, ChannelCount::Four, |x, y| {
        [(x * 8) as u8, (y * 10) as u8, ((x ^ y) * 7) as u8, 255]
    })
}

#[test]
fn white_image_negative_is_black() {
    let out = negative(&white_4x4()).unwrap();
    assert_eq!(out.dimensions(), (4, 4));
    assert!(out.data().iter().all(|&v| v == 0));
}

#[test]
fn grayscale_truncates_average() {
    let px = PixelBuffer::new(1, 1, ChannelCount::Three, vec![30, 60, 90]).unwrap();
    assert_eq!(grayscale(&px).unwrap().data(), &[60]);
}

#[test]
fn tone_scenarios_clamp() {
    let px = PixelBuffer::new(1, 1, ChannelCount::One, vec![200]).unwrap();
    assert_eq!(adjust_contrast(&px, 2.0).unwrap().data(), &[255]);

    let px = PixelBuffer::new(1, 1, ChannelCount::One, vec![100]).unwrap();
    assert_eq!(adjust_brightness(&px, -1.0).unwrap().data(), &[0]);
}

#[test]
fn identity_tone_is_noop() {
    let frame = camera_frame();
    assert_eq!(adjust_tone(&frame, &ToneParams::default()).unwrap(), frame);
}

#[test]
fn every_operation_preserves_dimensions() {
    let frame = camera_frame();
    let settings = FilterSettings::default();

    for kind in FilterKind::ALL {
        let out = apply_filter(kind, &frame, &settings).unwrap();
        assert_eq!(out.dimensions(), frame.dimensions(), "{}", kind);
        let expected_channels = match kind {
            FilterKind::Grayscale => ChannelCount::One,
            _ => ChannelCount::Four,
        };
        assert_eq!(out.channels(), expected_channels, "{}", kind);
    }

    for kind in ModificationKind::ALL {
        let out = apply_modification(kind, &frame, &settings).unwrap();
        assert_eq!(out.dimensions(), frame.dimensions(), "{}", kind);
    }
}

#[test]
fn involutions_hold() {
    let frame = camera_frame();
    assert_eq!(negative(&negative(&frame).unwrap()).unwrap(), frame);
    for axis in [FlipAxis::Horizontal, FlipAxis::Vertical, FlipAxis::Both] {
        assert_eq!(flip(&flip(&frame, axis).unwrap(), axis).unwrap(), frame);
    }
    assert_eq!(
        merge_channels(&split_channels(&frame).unwrap()).unwrap(),
        frame
    );
}

#[test]
fn gaussian_frame_is_black_with_default_kernel() {
    let frame = PixelBuffer::filled(40, 40, ChannelCount::Three, 150);
    let out = gaussian_blur(&frame, 15).unwrap();
    // Default kernel 15 leaves a 7-pixel band
    for i in 0..40 {
        assert_eq!(out.pixel(i, 6), &[0, 0, 0]);
        assert_eq!(out.pixel(6, i), &[0, 0, 0]);
        assert_eq!(out.pixel(i, 33), &[0, 0, 0]);
    }
    assert_eq!(out.pixel(7, 7), &[150, 150, 150]);
    assert_eq!(out.pixel(32, 32), &[150, 150, 150]);
}

#[test]
fn empty_input_fails_everywhere() {
    let empty = PixelBuffer::new(0, 0, ChannelCount::Four, vec![]).unwrap();
    let settings = FilterSettings::default();
    for kind in FilterKind::ALL {
        assert_eq!(
            apply_filter(kind, &empty, &settings),
            Err(EngineError::EmptyInput)
        );
    }
    for kind in ModificationKind::ALL {
        assert_eq!(
            apply_modification(kind, &empty, &settings),
            Err(EngineError::EmptyInput)
        );
    }
    assert_eq!(sepia(&empty), Err(EngineError::EmptyInput));
}

#[test]
fn editor_session() {
    let frame = camera_frame();
    let mut state = EditorState::new();

    for event in [
        Event::CapturePhoto(frame.clone()),
        Event::ApplyFilter(FilterKind::Sepia),
        Event::ApplyModification(ModificationKind::Flip),
        Event::ToggleDisplay,
    ] {
        state = reduce(&state, event);
    }

    assert!(state.show_original);
    assert_eq!(state.visible(), Some(&frame));

    let expected = flip(&sepia(&frame).unwrap(), FlipAxis::Horizontal).unwrap();
    assert_eq!(state.displayed.as_deref(), Some(&expected));

    state = reduce(&state, Event::ToggleDisplay);
    state = reduce(&state, Event::AdjustBrightness(0.1));
    let expected = adjust_brightness(&frame, 0.1).unwrap();
    assert_eq!(state.visible(), Some(&expected));
    assert!(state.notice.is_none());
}

#[cfg(feature = "worker")]
#[test]
fn worker_offloads_gaussian() {
    use filterlab_core::FilterWorker;

    let worker = FilterWorker::new(2).unwrap();
    let frame = camera_frame();
    let settings = FilterSettings::default();
    let task = worker.spawn(FilterKind::Gaussian, frame.clone(), settings.clone());
    assert_eq!(
        task.wait().unwrap(),
        apply_filter(FilterKind::Gaussian, &frame, &settings).unwrap()
    );
}
