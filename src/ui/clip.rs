//! Nested scissor regions.
//!
//! Every View that draws pushes its screen-space bounds, intersected with the
//! region beneath it, and pops on the way out. The stack depth while a View
//! draws its children equals that View's nesting depth below the Window.

use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;

use super::Rect;
use super::draw::DrawContext;

/// Scissor rectangle in device pixels with a bottom-up y axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// LIFO of active clip regions. The top is always contained in the entry
/// beneath it.
#[derive(Debug, Default)]
pub struct ClipStack {
    regions: SmallVec<[Rect; 8]>,
}

impl ClipStack {
    pub fn new() -> Self {
        Self {
            regions: SmallVec::new(),
        }
    }

    /// Push `requested`, intersected with the current top. Returns the
    /// region that is now active.
    pub fn push(&mut self, requested: Rect) -> Rect {
        let active = match self.regions.last() {
            Some(outer) => requested.intersect(outer),
            None => requested,
        };
        self.regions.push(active);
        active
    }

    pub fn pop(&mut self) -> Option<Rect> {
        self.regions.pop()
    }

    pub fn top(&self) -> Option<Rect> {
        self.regions.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Keeps a clip region pushed for as long as it lives; dropping it restores
/// the previous region on every exit path.
pub struct ScissorScope<'c, 'a> {
    ctx: &'c mut DrawContext<'a>,
}

impl<'c, 'a> ScissorScope<'c, 'a> {
    pub(crate) fn new(ctx: &'c mut DrawContext<'a>) -> Self {
        Self { ctx }
    }
}

impl<'a> Deref for ScissorScope<'_, 'a> {
    type Target = DrawContext<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl DerefMut for ScissorScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl Drop for ScissorScope<'_, '_> {
    fn drop(&mut self) {
        self.ctx.scissors_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_is_unclipped() {
        let mut stack = ClipStack::new();
        let active = stack.push(Rect::new(-5, 3, 40, 20));
        assert_eq!(active, Rect::new(-5, 3, 40, 20));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn nested_push_intersects() {
        let mut stack = ClipStack::new();
        stack.push(Rect::new(0, 0, 100, 100));
        let active = stack.push(Rect::new(50, 50, 100, 100));
        assert_eq!(active, Rect::new(50, 50, 50, 50));
    }

    #[test]
    fn disjoint_push_clamps_to_zero() {
        let mut stack = ClipStack::new();
        stack.push(Rect::new(0, 0, 10, 10));
        let active = stack.push(Rect::new(20, 30, 5, 5));
        assert_eq!(active.width, 0);
        assert_eq!(active.height, 0);
    }

    #[test]
    fn nested_regions_never_grow() {
        let mut stack = ClipStack::new();
        let mut outer = stack.push(Rect::new(10, 10, 200, 150));
        for i in 0..6 {
            let inner = stack.push(Rect::new(i * 13, i * 7, 120, 300));
            assert!(inner.x >= outer.x && inner.y >= outer.y);
            assert!(inner.right() <= outer.right());
            assert!(inner.bottom() <= outer.bottom());
            outer = inner;
        }
    }

    #[test]
    fn pop_restores_previous_top() {
        let mut stack = ClipStack::new();
        let first = stack.push(Rect::new(0, 0, 100, 100));
        stack.push(Rect::new(10, 10, 20, 20));
        stack.pop();
        assert_eq!(stack.top(), Some(first));
        stack.pop();
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn device_conversion_flips_y() {
        let rect = Rect::new(10, 20, 30, 40);
        let device = rect.to_device(2, 480);
        assert_eq!(
            device,
            DeviceRect {
                x: 20,
                y: 480 - 120,
                width: 60,
                height: 80,
            }
        );
    }
}
