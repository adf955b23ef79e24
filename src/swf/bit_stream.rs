//! Byte and bit level reading over a movie buffer.
//!
//! Byte-level values are little endian. Bit-level values are packed MSB first
//! and are only valid when read contiguously: any byte-level read drops the
//! partially consumed byte and continues at the next byte boundary.

use binary_reader::{BinaryReader, Endian};

use super::{
    error::DecodeError,
    types::{ColorTransform, Matrix, Rect, Rgba},
};

pub struct BitStream {
    reader: BinaryReader,
    bit_buffer: u8,
    bits_left: u32,
}

impl BitStream {
    pub fn new(data: &[u8]) -> Self {
        let mut reader = BinaryReader::from_u8(data);
        reader.set_endian(Endian::Little);
        Self {
            reader,
            bit_buffer: 0,
            bits_left: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.reader.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        self.align_to_byte();
        self.reader.jmp(pos);
    }

    pub fn len(&self) -> usize {
        self.reader.length
    }

    pub fn is_empty(&self) -> bool {
        self.reader.length == 0
    }

    pub fn remaining(&self) -> usize {
        self.reader.length.saturating_sub(self.reader.pos)
    }

    pub fn is_eof(&self) -> bool {
        self.remaining() == 0 && self.bits_left == 0
    }

    pub fn align_to_byte(&mut self) {
        self.bit_buffer = 0;
        self.bits_left = 0;
    }

    fn ensure(&self, wanted: usize) -> Result<(), DecodeError> {
        let pos = self.reader.pos;
        let len = self.reader.length;
        if pos.checked_add(wanted).map_or(true, |end| end > len) {
            return Err(DecodeError::OutOfRange { pos, wanted, len });
        }
        Ok(())
    }

    fn overrun(&self, wanted: usize) -> DecodeError {
        DecodeError::OutOfRange {
            pos: self.reader.pos,
            wanted,
            len: self.reader.length,
        }
    }

    // ========== Byte-level reads ==========

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.align_to_byte();
        self.ensure(1)?;
        self.reader.read_u8().map_err(|_| self.overrun(1))
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.align_to_byte();
        self.ensure(2)?;
        self.reader.read_u16().map_err(|_| self.overrun(2))
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.align_to_byte();
        self.ensure(4)?;
        self.reader.read_u32().map_err(|_| self.overrun(4))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(self.read_u32()? as i32)
    }

    /// 8.8 fixed point stored in a 16-bit word.
    pub fn read_fixed8(&mut self) -> Result<f32, DecodeError> {
        Ok(self.read_u16()? as f32 / 256.0)
    }

    /// 16.16 fixed point stored in a 32-bit word.
    pub fn read_fixed16_16(&mut self) -> Result<f32, DecodeError> {
        Ok(self.read_i32()? as f32 / 65536.0)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, DecodeError> {
        self.align_to_byte();
        self.ensure(count)?;
        let (pos, len) = (self.reader.pos, self.reader.length);
        match self.reader.read_bytes(count) {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(_) => Err(DecodeError::OutOfRange {
                pos,
                wanted: count,
                len,
            }),
        }
    }

    pub fn skip(&mut self, count: usize) -> Result<(), DecodeError> {
        self.align_to_byte();
        self.ensure(count)?;
        self.reader.jmp(self.reader.pos + count);
        Ok(())
    }

    /// Null-terminated string. Bytes that are not valid UTF-8 are replaced.
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let mut bytes = Vec::new();
        loop {
            let byte = self.read_u8()?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Variable length u32: 7 payload bits per byte, least significant group
    /// first, high bit set when another byte follows.
    pub fn read_encoded_u32(&mut self) -> Result<u32, DecodeError> {
        let mut result: u32 = 0;
        for i in 0..5 {
            let byte = self.read_u8()?;
            result |= ((byte & 0x7F) as u32) << (7 * i);
            if byte & 0x80 == 0 {
                break;
            }
        }
        Ok(result)
    }

    pub fn read_rgb(&mut self) -> Result<Rgba, DecodeError> {
        let r = self.read_u8()?;
        let g = self.read_u8()?;
        let b = self.read_u8()?;
        Ok(Rgba::rgb(r, g, b))
    }

    pub fn read_rgba(&mut self) -> Result<Rgba, DecodeError> {
        let r = self.read_u8()?;
        let g = self.read_u8()?;
        let b = self.read_u8()?;
        let a = self.read_u8()?;
        Ok(Rgba { r, g, b, a })
    }

    // ========== Bit-level reads ==========

    /// Read N bits as unsigned value (MSB first)
    pub fn read_bits_as_u32(&mut self, count: u32) -> Result<u32, DecodeError> {
        if count > 32 {
            return Err(DecodeError::InvalidBitCount(count));
        }

        let mut result: u32 = 0;
        let mut remaining = count;

        while remaining > 0 {
            if self.bits_left == 0 {
                self.ensure(1)?;
                self.bit_buffer = self.reader.read_u8().map_err(|_| self.overrun(1))?;
                self.bits_left = 8;
            }

            let take = remaining.min(self.bits_left);
            let shift = self.bits_left - take;
            let mask = ((1u32 << take) - 1) << shift;
            let bits = (self.bit_buffer as u32 & mask) >> shift;

            result = (result << take) | bits;
            self.bits_left -= take;
            remaining -= take;
        }

        Ok(result)
    }

    /// Read N bits as signed value (two's complement, MSB first)
    pub fn read_bits_as_i32(&mut self, count: u32) -> Result<i32, DecodeError> {
        let val = self.read_bits_as_u32(count)?;
        if count > 0 && count < 32 && val & (1 << (count - 1)) != 0 {
            let mask = !((1u32 << count) - 1);
            Ok((val | mask) as i32)
        } else {
            Ok(val as i32)
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_bits_as_u32(1)? != 0)
    }

    /// Signed 16.16 fixed point bit field.
    pub fn read_fixed_bits(&mut self, count: u32) -> Result<f32, DecodeError> {
        Ok(self.read_bits_as_i32(count)? as f32 / 65536.0)
    }

    // ========== Packed records ==========

    pub fn read_rect(&mut self) -> Result<Rect, DecodeError> {
        self.align_to_byte();
        let bits = self.read_bits_as_u32(5)?;
        let x_min = self.read_bits_as_i32(bits)?;
        let x_max = self.read_bits_as_i32(bits)?;
        let y_min = self.read_bits_as_i32(bits)?;
        let y_max = self.read_bits_as_i32(bits)?;
        self.align_to_byte();
        Ok(Rect {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Matrix with translation still in twips.
    pub fn read_matrix(&mut self) -> Result<Matrix, DecodeError> {
        self.align_to_byte();
        let mut matrix = Matrix::IDENTITY;

        if self.read_bit()? {
            let bits = self.read_bits_as_u32(5)?;
            matrix.a = self.read_fixed_bits(bits)?;
            matrix.d = self.read_fixed_bits(bits)?;
        }

        if self.read_bit()? {
            let bits = self.read_bits_as_u32(5)?;
            matrix.b = self.read_fixed_bits(bits)?;
            matrix.c = self.read_fixed_bits(bits)?;
        }

        let bits = self.read_bits_as_u32(5)?;
        matrix.tx = self.read_bits_as_i32(bits)? as f32;
        matrix.ty = self.read_bits_as_i32(bits)? as f32;
        self.align_to_byte();
        Ok(matrix)
    }

    pub fn read_cxform_rgb(&mut self) -> Result<ColorTransform, DecodeError> {
        self.read_cxform(false)
    }

    pub fn read_cxform_rgba(&mut self) -> Result<ColorTransform, DecodeError> {
        self.read_cxform(true)
    }

    fn read_cxform(&mut self, with_alpha: bool) -> Result<ColorTransform, DecodeError> {
        self.align_to_byte();
        let has_add = self.read_bit()?;
        let has_mul = self.read_bit()?;
        let bits = self.read_bits_as_u32(4)?;
        let channels = if with_alpha { 4 } else { 3 };

        let mut cxform = ColorTransform::IDENTITY;
        if has_mul {
            for i in 0..channels {
                cxform.mul[i] = self.read_bits_as_i32(bits)? as f32 / 256.0;
            }
        }
        if has_add {
            for i in 0..channels {
                cxform.add[i] = self.read_bits_as_i32(bits)? as f32;
            }
        }
        self.align_to_byte();
        Ok(cxform)
    }
}
