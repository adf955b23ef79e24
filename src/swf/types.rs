use std::ops::Mul;

pub const TWIPS_PER_PIXEL: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in twips unless converted with `to_pixel`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rect {
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    pub fn to_pixel(&self) -> PixelRect {
        PixelRect {
            left: self.x_min as f32 / TWIPS_PER_PIXEL,
            top: self.y_min as f32 / TWIPS_PER_PIXEL,
            right: self.x_max as f32 / TWIPS_PER_PIXEL,
            bottom: self.y_max as f32 / TWIPS_PER_PIXEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PixelRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// 2x3 affine matrix.
///
/// `a`/`d` are the scale terms, `b`/`c` the rotate-skew terms, so a point maps
/// to `(a*x + c*y + tx, b*x + d*y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translate(tx: f32, ty: f32) -> Self {
        Matrix {
            tx,
            ty,
            ..Matrix::IDENTITY
        }
    }

    /// Converts the translation from twips to pixels.
    pub fn to_pixel(&self) -> Matrix {
        Matrix {
            tx: self.tx / TWIPS_PER_PIXEL,
            ty: self.ty / TWIPS_PER_PIXEL,
            ..*self
        }
    }

    pub fn transform_point(&self, point: Point2) -> Point2 {
        Point2 {
            x: self.a * point.x + self.c * point.y + self.tx,
            y: self.b * point.x + self.d * point.y + self.ty,
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

/// `parent * child` applies `child` first.
impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        Matrix {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            tx: self.a * rhs.tx + self.c * rhs.ty + self.tx,
            ty: self.b * rhs.tx + self.d * rhs.ty + self.ty,
        }
    }
}

/// Per-channel `color * mul + add`, channels in RGBA order. Add terms are in
/// 0..255 units, multipliers are 1.0-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTransform {
    pub mul: [f32; 4],
    pub add: [f32; 4],
}

impl ColorTransform {
    pub const IDENTITY: ColorTransform = ColorTransform {
        mul: [1.0; 4],
        add: [0.0; 4],
    };

    pub fn apply(&self, color: Rgba) -> Rgba {
        let channels = [color.r, color.g, color.b, color.a];
        let mut out = [0u8; 4];
        for i in 0..4 {
            let value = channels[i] as f32 * self.mul[i] + self.add[i];
            out[i] = value.round().clamp(0.0, 255.0) as u8;
        }
        Rgba {
            r: out[0],
            g: out[1],
            b: out[2],
            a: out[3],
        }
    }
}

impl Default for ColorTransform {
    fn default() -> Self {
        ColorTransform::IDENTITY
    }
}

/// `parent * child` applies `child` first.
impl Mul for ColorTransform {
    type Output = ColorTransform;

    fn mul(self, rhs: ColorTransform) -> ColorTransform {
        let mut result = ColorTransform::IDENTITY;
        for i in 0..4 {
            result.mul[i] = self.mul[i] * rhs.mul[i];
            result.add[i] = self.mul[i] * rhs.add[i] + self.add[i];
        }
        result
    }
}
