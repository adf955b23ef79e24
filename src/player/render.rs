use crate::swf::{
    shape::ShapeDefinition,
    types::{ColorTransform, Matrix},
};

/// Drawing collaborator. The scene graph only ever asks it to draw a leaf
/// shape with a world transform; buffers, textures and shaders stay behind
/// this trait.
pub trait RenderBackend {
    fn draw_shape(&mut self, shape: &ShapeDefinition, matrix: &Matrix, cxform: &ColorTransform);
}

/// Records draw calls in order. Useful for hosts that batch, and for tests.
#[derive(Debug, Default)]
pub struct DrawList {
    pub calls: Vec<DrawCall>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub character_id: u16,
    pub matrix: Matrix,
    pub cxform: ColorTransform,
}

impl RenderBackend for DrawList {
    fn draw_shape(&mut self, shape: &ShapeDefinition, matrix: &Matrix, cxform: &ColorTransform) {
        self.calls.push(DrawCall {
            character_id: shape.character_id,
            matrix: *matrix,
            cxform: *cxform,
        });
    }
}
