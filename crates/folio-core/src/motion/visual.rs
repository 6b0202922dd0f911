/// Animatable properties of a page element
///
/// `offset_x` is in columns, `offset_y` in rows. `fill` is the fraction of a
/// progress indicator's target width that is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f32,
    pub offset_x: i16,
    pub offset_y: i16,
    pub fill: f32,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::SETTLED
    }
}

impl VisualState {
    /// Fully visible, in place
    pub const SETTLED: VisualState = VisualState {
        opacity: 1.0,
        offset_x: 0,
        offset_y: 0,
        fill: 1.0,
    };

    /// Transparent, in place
    pub fn hidden() -> Self {
        Self::SETTLED.faded()
    }

    pub fn faded(mut self) -> Self {
        self.opacity = 0.0;
        self
    }

    pub fn shifted_x(mut self, columns: i16) -> Self {
        self.offset_x = columns;
        self
    }

    pub fn shifted_y(mut self, rows: i16) -> Self {
        self.offset_y = rows;
        self
    }

    pub fn empty_fill(mut self) -> Self {
        self.fill = 0.0;
        self
    }

    pub fn is_settled(&self) -> bool {
        *self == Self::SETTLED
    }
}
