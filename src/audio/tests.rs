use super::capture::{deinterleave, frames_for, CaptureBuffer};
use super::device::{validate_device_index, DeviceDescriptor};
use super::{ensure_channel_support, NUM_CHANNELS};

fn stereo_descriptor(channels: u16) -> DeviceDescriptor {
    DeviceDescriptor {
        index: 0,
        name: "Test Card".to_string(),
        max_input_channels: channels,
    }
}

#[test]
fn frames_for_rounds_to_nearest_sample() {
    assert_eq!(frames_for(0.1, 44_100), 4_410);
    assert_eq!(frames_for(5.0, 44_100), 220_500);
    assert_eq!(frames_for(1.0005, 2_000), 2_001);
    // 0.33333... * 3 rounds up, not truncates
    assert_eq!(frames_for(1.0 / 3.0, 3), 1);
}

#[test]
fn frames_for_zero_duration_is_empty() {
    assert_eq!(frames_for(0.0, 44_100), 0);
}

#[test]
fn deinterleave_splits_stereo_frames() {
    let interleaved = [1.0f32, -1.0, 0.5, -0.5, 0.25, -0.25];
    let channels = deinterleave(&interleaved, 2);
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0], vec![1.0, 0.5, 0.25]);
    assert_eq!(channels[1], vec![-1.0, -0.5, -0.25]);
}

#[test]
fn deinterleave_drops_trailing_partial_frame() {
    let interleaved = [0.1f32, 0.2, 0.3];
    let channels = deinterleave(&interleaved, 2);
    assert_eq!(channels[0], vec![0.1]);
    assert_eq!(channels[1], vec![0.2]);
}

#[test]
fn deinterleave_of_empty_input_yields_empty_channels() {
    let channels = deinterleave(&[], 2);
    assert_eq!(channels.len(), 2);
    assert!(channels.iter().all(Vec::is_empty));
}

#[test]
fn capture_buffer_reports_shape() {
    let buffer = CaptureBuffer::new(vec![vec![0.0; 4_410], vec![0.0; 4_410]], 44_100);
    assert_eq!(buffer.channel_count(), 2);
    assert_eq!(buffer.samples_per_channel(), 4_410);
    assert_eq!(buffer.sample_rate(), 44_100);
}

#[test]
fn capture_buffer_with_no_channels_is_empty() {
    let buffer = CaptureBuffer::new(Vec::new(), 44_100);
    assert_eq!(buffer.channel_count(), 0);
    assert_eq!(buffer.samples_per_channel(), 0);
}

#[test]
fn accepts_index_within_enumerated_range() {
    assert!(validate_device_index(0, 3).is_ok());
    assert!(validate_device_index(2, 3).is_ok());
}

#[test]
fn rejects_index_outside_enumerated_range() {
    let err = validate_device_index(99, 3).unwrap_err().to_string();
    assert!(err.contains("invalid device id 99"), "got: {err}");
    assert!(err.contains("3 input device(s)"), "got: {err}");

    assert!(validate_device_index(3, 3).is_err());
    assert!(validate_device_index(0, 0).is_err());
}

#[test]
fn channel_precondition_requires_two_inputs() {
    assert!(ensure_channel_support(&stereo_descriptor(NUM_CHANNELS)).is_ok());
    assert!(ensure_channel_support(&stereo_descriptor(8)).is_ok());

    let err = ensure_channel_support(&stereo_descriptor(1))
        .unwrap_err()
        .to_string();
    assert!(err.contains("1 input channel"), "got: {err}");
}
