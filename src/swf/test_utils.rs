//! Fixture builders for decoder and timeline tests.

use super::header::TagCode;

#[derive(Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    used: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bits(&mut self, value: u32, count: u32) {
        for i in (0..count).rev() {
            let bit = (value >> i) & 1;
            self.current |= (bit as u8) << (7 - self.used);
            self.used += 1;
            if self.used == 8 {
                self.bytes.push(self.current);
                self.current = 0;
                self.used = 0;
            }
        }
    }

    pub fn write_sbits(&mut self, value: i32, count: u32) {
        self.write_bits(value as u32, count);
    }

    pub fn write_bit(&mut self, value: bool) {
        self.write_bits(value as u32, 1);
    }

    pub fn align(&mut self) {
        if self.used > 0 {
            self.bytes.push(self.current);
            self.current = 0;
            self.used = 0;
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.align();
        self.bytes.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.align();
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.align();
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_string(&mut self, value: &str) {
        self.align();
        self.bytes.extend_from_slice(value.as_bytes());
        self.bytes.push(0);
    }

    pub fn write_rect(&mut self, x_min: i32, x_max: i32, y_min: i32, y_max: i32) {
        self.align();
        let bits = [x_min, x_max, y_min, y_max]
            .iter()
            .map(|v| signed_bits_needed(*v))
            .max()
            .unwrap_or(1);
        self.write_bits(bits, 5);
        for value in [x_min, x_max, y_min, y_max] {
            self.write_sbits(value, bits);
        }
        self.align();
    }

    /// Identity matrix translated by `(tx, ty)` twips.
    pub fn write_translate(&mut self, tx: i32, ty: i32) {
        self.align();
        let bits = signed_bits_needed(tx).max(signed_bits_needed(ty));
        self.write_bit(false);
        self.write_bit(false);
        self.write_bits(bits, 5);
        self.write_sbits(tx, bits);
        self.write_sbits(ty, bits);
        self.align();
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.align();
        self.bytes.extend_from_slice(bytes);
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.align();
        self.bytes
    }
}

pub fn signed_bits_needed(value: i32) -> u32 {
    let magnitude = if value < 0 { !value as u32 } else { value as u32 };
    33 - magnitude.leading_zeros()
}

/// Assembles a movie byte stream tag by tag.
pub struct SwfBuilder {
    tags: Vec<u8>,
    frame_count: u16,
    frame_rate: u16,
    version: u8,
}

impl SwfBuilder {
    pub fn new(frame_count: u16) -> Self {
        Self {
            tags: Vec::new(),
            frame_count,
            frame_rate: 24 << 8,
            version: 6,
        }
    }

    pub fn tag(mut self, code: TagCode, body: &[u8]) -> Self {
        self.tags.extend(encode_tag(code as u16, body));
        self
    }

    pub fn raw_tag(mut self, code: u16, body: &[u8]) -> Self {
        self.tags.extend(encode_tag(code, body));
        self
    }

    pub fn show_frame(self) -> Self {
        self.tag(TagCode::ShowFrame, &[])
    }

    pub fn place(self, depth: u16, character_id: u16) -> Self {
        self.tag(TagCode::PlaceObject2, &place2_body(depth, Some(character_id)))
    }

    pub fn remove(self, depth: u16) -> Self {
        self.tag(TagCode::RemoveObject2, &depth.to_le_bytes())
    }

    pub fn build(self) -> Vec<u8> {
        let mut body = BitWriter::new();
        body.write_rect(0, 11000, 0, 8000);
        body.write_u16(self.frame_rate);
        body.write_u16(self.frame_count);
        let mut body = body.into_bytes();
        body.extend(self.tags);
        body.extend(encode_tag(TagCode::End as u16, &[]));

        let mut bytes = vec![b'F', b'W', b'S', self.version];
        bytes.extend_from_slice(&((body.len() + 8) as u32).to_le_bytes());
        bytes.extend(body);
        bytes
    }
}

pub fn encode_tag(code: u16, body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    if body.len() < 0x3F {
        bytes.extend_from_slice(&((code << 6) | body.len() as u16).to_le_bytes());
    } else {
        bytes.extend_from_slice(&((code << 6) | 0x3F).to_le_bytes());
        bytes.extend_from_slice(&(body.len() as u32).to_le_bytes());
    }
    bytes.extend_from_slice(body);
    bytes
}

/// PlaceObject2 body with only depth and (optionally) character id.
pub fn place2_body(depth: u16, character_id: Option<u16>) -> Vec<u8> {
    let mut writer = BitWriter::new();
    writer.write_u8(if character_id.is_some() { 0x02 } else { 0x01 });
    writer.write_u16(depth);
    if let Some(id) = character_id {
        writer.write_u16(id);
    }
    writer.into_bytes()
}

/// A DefineShape (type 1) body: one solid red fill, a square path moved to
/// `(10, 10)` with two straight edges.
pub fn simple_shape_body(character_id: u16) -> Vec<u8> {
    let mut writer = BitWriter::new();
    writer.write_u16(character_id);
    writer.write_rect(0, 100, 0, 100);
    writer.write_u8(1);
    writer.write_u8(0x00);
    writer.write_bytes(&[0xFF, 0x00, 0x00]);
    writer.write_u8(0);
    writer.write_bits(1, 4);
    writer.write_bits(0, 4);
    write_square_records(&mut writer, true);
    writer.into_bytes()
}

/// move-to(10,10), fill0 = 1, straight(+5, 0), straight(0, +5), end.
pub fn write_square_records(writer: &mut BitWriter, with_fill: bool) {
    writer.write_bit(false);
    writer.write_bits(if with_fill { 0x03 } else { 0x01 }, 5);
    writer.write_bits(5, 5);
    writer.write_sbits(10, 5);
    writer.write_sbits(10, 5);
    if with_fill {
        writer.write_bits(1, 1);
    }

    writer.write_bit(true);
    writer.write_bit(true);
    writer.write_bits(2, 4);
    writer.write_bit(false);
    writer.write_bit(false);
    writer.write_sbits(5, 4);

    writer.write_bit(true);
    writer.write_bit(true);
    writer.write_bits(2, 4);
    writer.write_bit(false);
    writer.write_bit(true);
    writer.write_sbits(5, 4);

    writer.write_bit(false);
    writer.write_bits(0, 5);
}
