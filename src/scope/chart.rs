//! Chart-ready view of one cycle's normalized waveform.

use crate::waveform::NormalizedWaveform;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// A flat line still gets a visible amplitude band.
const MIN_AMPLITUDE_SPAN: f64 = 0.05;

const TRACE_COLORS: [Color; 2] = [Color::Cyan, Color::Magenta];

/// Everything the surface needs to draw one cycle, derived fresh from that
/// cycle's waveform and discarded with it.
#[derive(Debug, Clone)]
pub struct ScopeFrame {
    points: Vec<Vec<(f64, f64)>>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    pub cycle: u64,
    pub samples_per_channel: usize,
    pub peak_db: f32,
    pub rms_db: f32,
}

impl ScopeFrame {
    pub fn new(waveform: &NormalizedWaveform, time_axis: &[f64], cycle: u64) -> Self {
        let points: Vec<Vec<(f64, f64)>> = waveform
            .channels()
            .iter()
            .map(|channel| {
                time_axis
                    .iter()
                    .copied()
                    .zip(channel.iter().map(|&sample| f64::from(sample)))
                    .collect()
            })
            .collect();
        let x_bounds = tight_x_bounds(time_axis);
        let y_bounds = tight_y_bounds(&points);
        Self {
            points,
            x_bounds,
            y_bounds,
            cycle,
            samples_per_channel: waveform.samples_per_channel(),
            peak_db: waveform.source_peak_db(),
            rms_db: waveform.source_rms_db(),
        }
    }

    pub(crate) fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    pub(crate) fn y_bounds(&self) -> [f64; 2] {
        self.y_bounds
    }
}

/// X range hugging the time axis; an empty axis falls back to a unit span so
/// the chart still has valid bounds.
pub(crate) fn tight_x_bounds(time_axis: &[f64]) -> [f64; 2] {
    let last = time_axis.last().copied().unwrap_or(0.0);
    [0.0, if last > 0.0 { last } else { 1.0 }]
}

/// Y range hugging the data, symmetric around zero.
pub(crate) fn tight_y_bounds(points: &[Vec<(f64, f64)>]) -> [f64; 2] {
    let peak = points
        .iter()
        .flatten()
        .fold(0.0_f64, |peak, &(_, y)| peak.max(y.abs()));
    let span = peak.max(MIN_AMPLITUDE_SPAN);
    [-span, span]
}

/// Draw all channel traces for the current cycle into `area`. The chart is
/// rebuilt from scratch each call, so no stale traces survive a redraw.
pub(super) fn render_chart(frame: &mut Frame, area: Rect, scope: &ScopeFrame) {
    let datasets: Vec<Dataset> = scope
        .points
        .iter()
        .enumerate()
        .map(|(index, points)| {
            Dataset::default()
                .name(format!("ch {index}"))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(TRACE_COLORS[index % TRACE_COLORS.len()]))
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::default().title(" Recorded Audio ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Time (s)")
                .style(Style::default().fg(Color::DarkGray))
                .bounds(scope.x_bounds)
                .labels(bound_labels(scope.x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Amplitude")
                .style(Style::default().fg(Color::DarkGray))
                .bounds(scope.y_bounds)
                .labels(bound_labels(scope.y_bounds)),
        );

    frame.render_widget(chart, area);
}

fn bound_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|value| Span::raw(format!("{value:.3}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CaptureBuffer;
    use crate::waveform::normalize;

    fn frame_for(channels: Vec<Vec<f32>>, sample_rate: u32) -> ScopeFrame {
        let (waveform, axis) = normalize(CaptureBuffer::new(channels, sample_rate));
        ScopeFrame::new(&waveform, &axis, 1)
    }

    #[test]
    fn x_bounds_hug_the_time_axis() {
        let axis = [0.0, 0.25, 0.5, 0.75];
        assert_eq!(tight_x_bounds(&axis), [0.0, 0.75]);
    }

    #[test]
    fn x_bounds_fall_back_on_empty_axis() {
        assert_eq!(tight_x_bounds(&[]), [0.0, 1.0]);
    }

    #[test]
    fn y_bounds_are_symmetric_and_tight() {
        let points = vec![vec![(0.0, 0.3), (1.0, -0.8)], vec![(0.0, 0.1)]];
        assert_eq!(tight_y_bounds(&points), [-0.8, 0.8]);
    }

    #[test]
    fn y_bounds_keep_a_minimum_span_for_flat_lines() {
        let points = vec![vec![(0.0, 0.0), (1.0, 0.0)]];
        assert_eq!(tight_y_bounds(&points), [-MIN_AMPLITUDE_SPAN, MIN_AMPLITUDE_SPAN]);
    }

    #[test]
    fn scope_frame_keeps_one_trace_per_channel() {
        let frame = frame_for(vec![vec![0.5, -0.5, 0.25], vec![0.1, 0.2, -0.1]], 1_000);
        assert_eq!(frame.points.len(), 2);
        assert_eq!(frame.samples_per_channel, 3);
        assert_eq!(frame.points[0].len(), 3);
        // Normalized data spans the full amplitude band.
        assert_eq!(frame.y_bounds(), [-1.0, 1.0]);
        // Last timestamp is (n-1)/fs.
        assert!((frame.x_bounds()[1] - 2.0 / 1_000.0).abs() < 1e-12);
    }

    #[test]
    fn silent_frame_renders_a_narrow_band() {
        let frame = frame_for(vec![vec![0.0; 4], vec![0.0; 4]], 1_000);
        assert_eq!(frame.y_bounds(), [-MIN_AMPLITUDE_SPAN, MIN_AMPLITUDE_SPAN]);
        assert_eq!(frame.peak_db, -60.0);
    }
}
