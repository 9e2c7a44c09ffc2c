use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::AppError;

pub const FIGURE_WIDTH: u32 = 800;
pub const FIGURE_HEIGHT: u32 = 600;

/// A rendered chart: a plain RGB8 pixel buffer that can be handed to the
/// bitmap backend for drawing and exported as PNG bytes.
#[derive(Debug, Clone)]
pub struct Figure {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0xff; (width * height * 3) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    pub fn to_png(&self) -> Result<Vec<u8>, AppError> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| AppError::Encoding(format!("Failed to write PNG header: {}", e)))?;
            writer
                .write_image_data(&self.buffer)
                .map_err(|e| AppError::Encoding(format!("Failed to encode PNG: {}", e)))?;
        }
        Ok(out)
    }
}

/// Fallback figure with the chart title and an instructional hint. Used
/// whenever a spec is missing the columns its chart kind needs.
pub(crate) fn placeholder(title: &str, message: &str) -> Figure {
    let mut figure = Figure::new(FIGURE_WIDTH, FIGURE_HEIGHT);
    let (w, h) = (figure.width(), figure.height());
    let result = (|| -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::with_buffer(figure.buffer_mut(), (w, h)).into_drawing_area();
        root.fill(&WHITE)?;
        let title_style = ("sans-serif", 24)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(title.to_string(), ((w / 2) as i32, 20), title_style))?;
        let hint_style = ("sans-serif", 20)
            .into_font()
            .color(&BLACK.mix(0.7))
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            message.to_string(),
            ((w / 2) as i32, (h / 2) as i32),
            hint_style,
        ))?;
        root.present()?;
        Ok(())
    })();
    if let Err(e) = result {
        tracing::warn!("placeholder draw failed: {}", e);
    }
    figure
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_figure_is_white() {
        let figure = Figure::new(4, 2);
        assert_eq!(figure.rgb().len(), 4 * 2 * 3);
        assert!(figure.rgb().iter().all(|b| *b == 0xff));
    }

    #[test]
    fn png_export_carries_the_signature() {
        let figure = Figure::new(16, 16);
        let bytes = figure.to_png().unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn placeholder_has_standard_dimensions() {
        let figure = placeholder("Title", "Pick a column");
        assert_eq!(figure.width(), FIGURE_WIDTH);
        assert_eq!(figure.height(), FIGURE_HEIGHT);
    }
}
