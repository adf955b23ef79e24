//! Shape definitions and the shape-record state machine.
//!
//! Coordinates stay in twips. Paths are split whenever a style change or a
//! move-to is seen so that every path carries exactly one style triple.

use log::debug;

use super::{
    bit_stream::BitStream,
    error::DecodeError,
    types::{Point2, Rect, Rgba},
};

const SHAPE_END: u32 = 0x00;
const SHAPE_MOVE_TO: u32 = 0x01;
const SHAPE_FILL_STYLE_0: u32 = 0x02;
const SHAPE_FILL_STYLE_1: u32 = 0x04;
const SHAPE_LINE_STYLE: u32 = 0x08;
const SHAPE_NEW_STYLES: u32 = 0x10;

const FILL_SOLID: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStyle {
    Solid(Rgba),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub width: u16,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeEdge {
    Straight { to: Point2 },
    Curved { control: Point2, anchor: Point2 },
}

impl ShapeEdge {
    pub fn end_point(&self) -> Point2 {
        match self {
            ShapeEdge::Straight { to } => *to,
            ShapeEdge::Curved { anchor, .. } => *anchor,
        }
    }
}

/// Style indices are 1-based into the shape's style arrays; 0 means unset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapePath {
    pub start: Point2,
    pub edges: Vec<ShapeEdge>,
    pub left_fill: u32,
    pub right_fill: u32,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDefinition {
    pub character_id: u16,
    pub bounds: Rect,
    pub fill_styles: Vec<FillStyle>,
    pub line_styles: Vec<LineStyle>,
    pub paths: Vec<ShapePath>,
}

impl ShapeDefinition {
    pub fn fill_style(&self, index: u32) -> Option<&FillStyle> {
        index.checked_sub(1).and_then(|i| self.fill_styles.get(i as usize))
    }

    pub fn line_style(&self, index: u32) -> Option<&LineStyle> {
        index.checked_sub(1).and_then(|i| self.line_styles.get(i as usize))
    }

    /// DefineShape (1), DefineShape2 (2) or DefineShape3 (3).
    pub fn read(stream: &mut BitStream, shape_type: u8) -> Result<ShapeDefinition, DecodeError> {
        let character_id = stream.read_u16()?;
        let bounds = stream.read_rect()?;

        let mut shape = ShapeDefinition {
            character_id,
            bounds,
            fill_styles: Vec::new(),
            line_styles: Vec::new(),
            paths: Vec::new(),
        };
        read_fill_styles(stream, &mut shape.fill_styles, shape_type)?;
        read_line_styles(stream, &mut shape.line_styles, shape_type)?;

        let mut builder = PathBuilder::default();
        let mut fill_bits = stream.read_bits_as_u32(4)?;
        let mut line_bits = stream.read_bits_as_u32(4)?;
        let mut fill_base = 0u32;
        let mut line_base = 0u32;

        loop {
            let is_edge = stream.read_bit()?;
            if !is_edge {
                let mask = stream.read_bits_as_u32(5)?;
                if mask == SHAPE_END {
                    builder.flush(&mut shape.paths);
                    break;
                }

                if mask & SHAPE_MOVE_TO != 0 {
                    let bits = stream.read_bits_as_u32(5)?;
                    let x = stream.read_bits_as_i32(bits)? as f32;
                    let y = stream.read_bits_as_i32(bits)? as f32;
                    builder.cursor = Point2::new(x, y);
                    builder.flush(&mut shape.paths);
                }

                if mask & SHAPE_FILL_STYLE_0 != 0 && fill_bits > 0 {
                    builder.flush(&mut shape.paths);
                    builder.path.left_fill = rebase(stream.read_bits_as_u32(fill_bits)?, fill_base);
                }

                if mask & SHAPE_FILL_STYLE_1 != 0 && fill_bits > 0 {
                    builder.flush(&mut shape.paths);
                    builder.path.right_fill = rebase(stream.read_bits_as_u32(fill_bits)?, fill_base);
                }

                if mask & SHAPE_LINE_STYLE != 0 && line_bits > 0 {
                    builder.flush(&mut shape.paths);
                    builder.path.line = rebase(stream.read_bits_as_u32(line_bits)?, line_base);
                }

                if mask & SHAPE_NEW_STYLES != 0 {
                    if shape_type < 2 {
                        return Err(DecodeError::IllegalNewStyles { shape_type });
                    }
                    builder.flush(&mut shape.paths);

                    fill_base = shape.fill_styles.len() as u32;
                    line_base = shape.line_styles.len() as u32;
                    read_fill_styles(stream, &mut shape.fill_styles, shape_type)?;
                    read_line_styles(stream, &mut shape.line_styles, shape_type)?;
                    fill_bits = stream.read_bits_as_u32(4)?;
                    line_bits = stream.read_bits_as_u32(4)?;
                }
            } else if stream.read_bit()? {
                let bits = stream.read_bits_as_u32(4)? + 2;
                let (mut dx, mut dy) = (0.0, 0.0);
                if stream.read_bit()? {
                    dx = stream.read_bits_as_i32(bits)? as f32;
                    dy = stream.read_bits_as_i32(bits)? as f32;
                } else if stream.read_bit()? {
                    dy = stream.read_bits_as_i32(bits)? as f32;
                } else {
                    dx = stream.read_bits_as_i32(bits)? as f32;
                }

                builder.cursor.x += dx;
                builder.cursor.y += dy;
                builder.path.edges.push(ShapeEdge::Straight { to: builder.cursor });
            } else {
                let bits = stream.read_bits_as_u32(4)? + 2;
                let control_dx = stream.read_bits_as_i32(bits)? as f32;
                let control_dy = stream.read_bits_as_i32(bits)? as f32;
                let anchor_dx = stream.read_bits_as_i32(bits)? as f32;
                let anchor_dy = stream.read_bits_as_i32(bits)? as f32;

                // Both points are deltas: control from the cursor, anchor from
                // the control point. Reading them as absolute coordinates
                // misplaces every curve that does not start at the origin.
                let control = Point2::new(
                    builder.cursor.x + control_dx,
                    builder.cursor.y + control_dy,
                );
                let anchor = Point2::new(control.x + anchor_dx, control.y + anchor_dy);
                builder.path.edges.push(ShapeEdge::Curved { control, anchor });
                builder.cursor = anchor;
            }
        }

        debug!(
            "DefineShape{} id={} fills={} lines={} paths={}",
            shape_type,
            shape.character_id,
            shape.fill_styles.len(),
            shape.line_styles.len(),
            shape.paths.len()
        );
        Ok(shape)
    }
}

fn rebase(index: u32, base: u32) -> u32 {
    if index > 0 {
        index + base
    } else {
        0
    }
}

#[derive(Default)]
struct PathBuilder {
    cursor: Point2,
    path: ShapePath,
}

impl PathBuilder {
    /// Emits the current path if it has edges and restarts at the cursor.
    /// Styles carry over to the next path until changed.
    fn flush(&mut self, paths: &mut Vec<ShapePath>) {
        if !self.path.edges.is_empty() {
            let next = ShapePath {
                start: self.cursor,
                edges: Vec::new(),
                left_fill: self.path.left_fill,
                right_fill: self.path.right_fill,
                line: self.path.line,
            };
            paths.push(std::mem::replace(&mut self.path, next));
        } else {
            self.path.start = self.cursor;
        }
    }
}

fn read_style_count(stream: &mut BitStream) -> Result<usize, DecodeError> {
    let count = stream.read_u8()?;
    if count == 0xFF {
        Ok(stream.read_u16()? as usize)
    } else {
        Ok(count as usize)
    }
}

fn read_color(stream: &mut BitStream, shape_type: u8) -> Result<Rgba, DecodeError> {
    if shape_type >= 3 {
        stream.read_rgba()
    } else {
        stream.read_rgb()
    }
}

pub fn read_fill_styles(
    stream: &mut BitStream,
    styles: &mut Vec<FillStyle>,
    shape_type: u8,
) -> Result<(), DecodeError> {
    let count = read_style_count(stream)?;
    styles.reserve(count);
    for _ in 0..count {
        let kind = stream.read_u8()?;
        match kind {
            FILL_SOLID => styles.push(FillStyle::Solid(read_color(stream, shape_type)?)),
            _ => return Err(DecodeError::UnsupportedFillStyle(kind)),
        }
    }
    Ok(())
}

pub fn read_line_styles(
    stream: &mut BitStream,
    styles: &mut Vec<LineStyle>,
    shape_type: u8,
) -> Result<(), DecodeError> {
    let count = read_style_count(stream)?;
    styles.reserve(count);
    for _ in 0..count {
        let width = stream.read_u16()?;
        let color = read_color(stream, shape_type)?;
        styles.push(LineStyle { width, color });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swf::test_utils::{simple_shape_body, write_square_records, BitWriter};

    fn shape_header(writer: &mut BitWriter, fills: &[[u8; 3]], lines: u8) {
        writer.write_u16(5);
        writer.write_rect(0, 100, 0, 100);
        writer.write_u8(fills.len() as u8);
        for color in fills {
            writer.write_u8(FILL_SOLID);
            writer.write_bytes(color);
        }
        writer.write_u8(lines);
        for _ in 0..lines {
            writer.write_u16(20);
            writer.write_bytes(&[0, 0, 0]);
        }
    }

    #[test]
    fn test_move_and_two_straight_edges() {
        let bytes = simple_shape_body(5);
        let shape = ShapeDefinition::read(&mut BitStream::new(&bytes), 1).unwrap();

        assert_eq!(shape.character_id, 5);
        assert_eq!(shape.fill_styles, vec![FillStyle::Solid(Rgba::rgb(255, 0, 0))]);
        assert_eq!(shape.paths.len(), 1);
        let path = &shape.paths[0];
        assert_eq!(path.start, Point2::new(10.0, 10.0));
        assert_eq!(
            path.edges,
            vec![
                ShapeEdge::Straight { to: Point2::new(15.0, 10.0) },
                ShapeEdge::Straight { to: Point2::new(15.0, 15.0) },
            ]
        );
        assert_eq!((path.left_fill, path.right_fill, path.line), (1, 0, 0));
        assert_eq!(shape.fill_style(path.left_fill), shape.fill_styles.first());
    }

    #[test]
    fn test_unstyled_path() {
        let mut writer = BitWriter::new();
        shape_header(&mut writer, &[], 0);
        writer.write_bits(0, 4);
        writer.write_bits(0, 4);
        write_square_records(&mut writer, false);
        let bytes = writer.into_bytes();

        let shape = ShapeDefinition::read(&mut BitStream::new(&bytes), 1).unwrap();
        assert_eq!(shape.paths.len(), 1);
        assert_eq!(shape.paths[0].start, Point2::new(10.0, 10.0));
        let ends = shape.paths[0].edges.iter().map(|e| e.end_point()).collect::<Vec<_>>();
        assert_eq!(ends, vec![Point2::new(15.0, 10.0), Point2::new(15.0, 15.0)]);
        assert_eq!((shape.paths[0].left_fill, shape.paths[0].line), (0, 0));
    }

    #[test]
    fn test_style_change_without_edges_emits_nothing() {
        let mut writer = BitWriter::new();
        shape_header(&mut writer, &[], 0);
        writer.write_bits(0, 4);
        writer.write_bits(0, 4);
        writer.write_bit(false);
        writer.write_bits(SHAPE_MOVE_TO, 5);
        writer.write_bits(4, 5);
        writer.write_sbits(3, 4);
        writer.write_sbits(3, 4);
        writer.write_bit(false);
        writer.write_bits(SHAPE_END, 5);
        let bytes = writer.into_bytes();

        let shape = ShapeDefinition::read(&mut BitStream::new(&bytes), 1).unwrap();
        assert!(shape.paths.is_empty());
    }

    #[test]
    fn test_curved_edge_is_relative() {
        let mut writer = BitWriter::new();
        shape_header(&mut writer, &[], 0);
        writer.write_bits(0, 4);
        writer.write_bits(0, 4);
        writer.write_bit(false);
        writer.write_bits(SHAPE_MOVE_TO, 5);
        writer.write_bits(6, 5);
        writer.write_sbits(10, 6);
        writer.write_sbits(10, 6);
        writer.write_bit(true);
        writer.write_bit(false);
        writer.write_bits(4, 4);
        for delta in [5, -5, 5, 5] {
            writer.write_sbits(delta, 6);
        }
        writer.write_bit(false);
        writer.write_bits(SHAPE_END, 5);
        let bytes = writer.into_bytes();

        let shape = ShapeDefinition::read(&mut BitStream::new(&bytes), 1).unwrap();
        assert_eq!(
            shape.paths[0].edges,
            vec![ShapeEdge::Curved {
                control: Point2::new(15.0, 5.0),
                anchor: Point2::new(20.0, 10.0),
            }]
        );
    }

    #[test]
    fn test_line_style_change_splits_path() {
        let mut writer = BitWriter::new();
        shape_header(&mut writer, &[[1, 2, 3]], 1);
        writer.write_bits(1, 4);
        writer.write_bits(1, 4);
        write_square_records_without_end(&mut writer);
        // line style 1, then one more edge
        writer.write_bit(false);
        writer.write_bits(SHAPE_LINE_STYLE, 5);
        writer.write_bits(1, 1);
        writer.write_bit(true);
        writer.write_bit(true);
        writer.write_bits(2, 4);
        writer.write_bit(false);
        writer.write_bit(false);
        writer.write_sbits(-5, 4);
        writer.write_bit(false);
        writer.write_bits(SHAPE_END, 5);
        let bytes = writer.into_bytes();

        let shape = ShapeDefinition::read(&mut BitStream::new(&bytes), 1).unwrap();
        assert_eq!(shape.paths.len(), 2);
        assert_eq!(shape.paths[0].line, 0);
        assert_eq!(shape.paths[1].line, 1);
        assert_eq!(shape.paths[1].left_fill, 1);
        assert_eq!(shape.paths[1].start, Point2::new(15.0, 15.0));
        assert_eq!(
            shape.paths[1].edges,
            vec![ShapeEdge::Straight { to: Point2::new(10.0, 15.0) }]
        );
        assert_eq!(shape.line_style(1).map(|s| s.width), Some(20));
    }

    fn write_square_records_without_end(writer: &mut BitWriter) {
        // Same records as the square fixture, minus the end record.
        writer.write_bit(false);
        writer.write_bits(0x03, 5);
        writer.write_bits(5, 5);
        writer.write_sbits(10, 5);
        writer.write_sbits(10, 5);
        writer.write_bits(1, 1);
        for vertical in [false, true] {
            writer.write_bit(true);
            writer.write_bit(true);
            writer.write_bits(2, 4);
            writer.write_bit(false);
            writer.write_bit(vertical);
            writer.write_sbits(5, 4);
        }
    }

    #[test]
    fn test_new_styles_rebase_indices() {
        let mut writer = BitWriter::new();
        shape_header(&mut writer, &[[1, 1, 1], [2, 2, 2]], 0);
        writer.write_bits(2, 4);
        writer.write_bits(0, 4);

        writer.write_bit(false);
        writer.write_bits(SHAPE_NEW_STYLES | SHAPE_FILL_STYLE_1, 5);
        // fill1 is read with the old widths before the new arrays arrive
        writer.write_bits(2, 2);
        writer.write_u8(1);
        writer.write_u8(FILL_SOLID);
        writer.write_bytes(&[9, 9, 9]);
        writer.write_u8(0);
        writer.write_bits(1, 4);
        writer.write_bits(0, 4);

        writer.write_bit(false);
        writer.write_bits(SHAPE_FILL_STYLE_0, 5);
        writer.write_bits(1, 1);
        writer.write_bit(true);
        writer.write_bit(true);
        writer.write_bits(2, 4);
        writer.write_bit(true);
        writer.write_sbits(1, 4);
        writer.write_sbits(1, 4);
        writer.write_bit(false);
        writer.write_bits(SHAPE_END, 5);
        let bytes = writer.into_bytes();

        let shape = ShapeDefinition::read(&mut BitStream::new(&bytes), 2).unwrap();
        assert_eq!(shape.fill_styles.len(), 3);
        assert_eq!(shape.paths.len(), 1);
        assert_eq!(shape.paths[0].left_fill, 3);
        assert_eq!(shape.paths[0].right_fill, 2);
        assert_eq!(
            shape.fill_style(3),
            Some(&FillStyle::Solid(Rgba::rgb(9, 9, 9)))
        );
    }

    #[test]
    fn test_new_styles_rejected_in_shape1() {
        let mut writer = BitWriter::new();
        shape_header(&mut writer, &[], 0);
        writer.write_bits(0, 4);
        writer.write_bits(0, 4);
        writer.write_bit(false);
        writer.write_bits(SHAPE_NEW_STYLES, 5);
        writer.write_u8(0);
        writer.write_u8(0);
        let bytes = writer.into_bytes();

        assert_eq!(
            ShapeDefinition::read(&mut BitStream::new(&bytes), 1),
            Err(DecodeError::IllegalNewStyles { shape_type: 1 })
        );
    }

    #[test]
    fn test_gradient_fill_is_fatal() {
        let mut writer = BitWriter::new();
        writer.write_u16(5);
        writer.write_rect(0, 100, 0, 100);
        writer.write_u8(1);
        writer.write_u8(0x10);
        let bytes = writer.into_bytes();

        assert_eq!(
            ShapeDefinition::read(&mut BitStream::new(&bytes), 1),
            Err(DecodeError::UnsupportedFillStyle(0x10))
        );
    }

    #[test]
    fn test_extended_style_count_and_rgba() {
        let mut writer = BitWriter::new();
        writer.write_u8(0xFF);
        writer.write_u16(2);
        for alpha in [128, 255] {
            writer.write_u8(FILL_SOLID);
            writer.write_bytes(&[1, 2, 3, alpha]);
        }
        let bytes = writer.into_bytes();

        let mut styles = Vec::new();
        read_fill_styles(&mut BitStream::new(&bytes), &mut styles, 3).unwrap();
        assert_eq!(
            styles,
            vec![
                FillStyle::Solid(Rgba { r: 1, g: 2, b: 3, a: 128 }),
                FillStyle::Solid(Rgba { r: 1, g: 2, b: 3, a: 255 }),
            ]
        );
    }

    #[test]
    fn test_truncated_shape_is_out_of_range() {
        let mut bytes = simple_shape_body(5);
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            ShapeDefinition::read(&mut BitStream::new(&bytes), 1),
            Err(DecodeError::OutOfRange { .. })
        ));
    }
}
