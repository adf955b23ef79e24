//! Hand-assembled movies for the integration tests.

#![allow(dead_code)]

pub const END: u16 = 0;
pub const SHOW_FRAME: u16 = 1;
pub const DEFINE_SHAPE: u16 = 2;
pub const DO_ACTION: u16 = 12;
pub const PLACE_OBJECT2: u16 = 26;
pub const REMOVE_OBJECT2: u16 = 28;
pub const DEFINE_SPRITE: u16 = 39;
pub const FRAME_LABEL: u16 = 43;

#[derive(Default)]
struct Bits {
    bytes: Vec<u8>,
    current: u8,
    used: u32,
}

impl Bits {
    fn push(&mut self, value: i32, count: u32) {
        for i in (0..count).rev() {
            let bit = ((value as u32) >> i) & 1;
            self.current |= (bit as u8) << (7 - self.used);
            self.used += 1;
            if self.used == 8 {
                self.bytes.push(self.current);
                self.current = 0;
                self.used = 0;
            }
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.used > 0 {
            self.bytes.push(self.current);
        }
        self.bytes
    }
}

pub fn tag(code: u16, body: &[u8]) -> Vec<u8> {
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

/// An uncompressed version 6 movie, 550x400 at 12 fps, around `tags`.
pub fn movie(frame_count: u16, tags: &[Vec<u8>]) -> Vec<u8> {
    let mut rect = Bits::default();
    rect.push(15, 5);
    for value in [0, 11000, 0, 8000] {
        rect.push(value, 15);
    }

    let mut body = rect.finish();
    body.extend_from_slice(&(12u16 << 8).to_le_bytes());
    body.extend_from_slice(&frame_count.to_le_bytes());
    for tag in tags {
        body.extend_from_slice(tag);
    }
    body.extend(tag(END, &[]));

    let mut bytes = b"FWS".to_vec();
    bytes.push(6);
    bytes.extend_from_slice(&((body.len() + 8) as u32).to_le_bytes());
    bytes.extend(body);
    bytes
}

/// A shape with empty bounds, no styles and no edges.
pub fn empty_shape(character_id: u16) -> Vec<u8> {
    let mut body = character_id.to_le_bytes().to_vec();
    body.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00]);
    tag(DEFINE_SHAPE, &body)
}

pub fn sprite(character_id: u16, frame_count: u16, tags: &[Vec<u8>]) -> Vec<u8> {
    let mut body = character_id.to_le_bytes().to_vec();
    body.extend_from_slice(&frame_count.to_le_bytes());
    for tag in tags {
        body.extend_from_slice(tag);
    }
    body.extend(tag(END, &[]));
    tag(DEFINE_SPRITE, &body)
}

pub fn place(depth: u16, character_id: u16) -> Vec<u8> {
    let mut body = vec![0x02];
    body.extend_from_slice(&depth.to_le_bytes());
    body.extend_from_slice(&character_id.to_le_bytes());
    tag(PLACE_OBJECT2, &body)
}

/// Places `character_id` translated by whole pixels.
pub fn place_at(depth: u16, character_id: u16, x: i32, y: i32) -> Vec<u8> {
    let mut body = vec![0x06];
    body.extend_from_slice(&depth.to_le_bytes());
    body.extend_from_slice(&character_id.to_le_bytes());
    let mut matrix = Bits::default();
    matrix.push(0, 1);
    matrix.push(0, 1);
    matrix.push(16, 5);
    matrix.push(x * 20, 16);
    matrix.push(y * 20, 16);
    body.extend(matrix.finish());
    tag(PLACE_OBJECT2, &body)
}

/// Moves the instance at `depth` without replacing it.
pub fn move_to(depth: u16, x: i32, y: i32) -> Vec<u8> {
    let mut body = vec![0x05];
    body.extend_from_slice(&depth.to_le_bytes());
    let mut matrix = Bits::default();
    matrix.push(0, 1);
    matrix.push(0, 1);
    matrix.push(16, 5);
    matrix.push(x * 20, 16);
    matrix.push(y * 20, 16);
    body.extend(matrix.finish());
    tag(PLACE_OBJECT2, &body)
}

pub fn remove(depth: u16) -> Vec<u8> {
    tag(REMOVE_OBJECT2, &depth.to_le_bytes())
}

pub fn show_frame() -> Vec<u8> {
    tag(SHOW_FRAME, &[])
}

pub fn label(name: &str) -> Vec<u8> {
    let mut body = name.as_bytes().to_vec();
    body.push(0);
    tag(FRAME_LABEL, &body)
}

pub fn do_action(actions: &[u8]) -> Vec<u8> {
    tag(DO_ACTION, actions)
}

pub fn push_str(value: &str) -> Vec<u8> {
    let mut operands = vec![0x00];
    operands.extend_from_slice(value.as_bytes());
    operands.push(0);
    long_action(0x96, &operands)
}

pub fn long_action(code: u8, operands: &[u8]) -> Vec<u8> {
    let mut bytes = vec![code];
    bytes.extend_from_slice(&(operands.len() as u16).to_le_bytes());
    bytes.extend_from_slice(operands);
    bytes
}
