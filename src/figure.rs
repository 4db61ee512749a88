//! The drawing surface regions live on.

use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

use glam::DVec2;
use iced::{Color, Rectangle, Size};
use indexmap::IndexMap;

use crate::{
    gridspec::{GridSpec, SubplotParams},
    region::{Region, RegionId},
    series::ShapeId,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Default figure size in inches.
const DEFAULT_SIZE: Size<f64> = Size {
    width: 6.4,
    height: 4.8,
};

/// Unique identifier of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FigureId(u64);

/// A straight line placed in figure-relative coordinates.
///
/// Figure lines are never clipped to a region, so they can straddle region
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLine {
    pub start: DVec2,
    pub end: DVec2,
    pub color: Color,
    /// Line width in points.
    pub line_width: f32,
    /// Region the line was drawn for, if any.
    pub owner: Option<RegionId>,
}

/// One end of a figure line, laid out for a line-list vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// Figure-relative position.
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// A figure: a sized surface holding regions and figure-relative lines.
///
/// Regions keep their creation order, which is also the order every
/// operation visits them in.
#[derive(Debug)]
pub struct Figure {
    id: FigureId,
    size: Size<f64>,
    params: SubplotParams,
    regions: IndexMap<RegionId, Region>,
    lines: IndexMap<ShapeId, FigureLine>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE.width, DEFAULT_SIZE.height)
    }
}

impl Figure {
    /// Create an empty figure `width` x `height` inches large.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            id: FigureId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            size: Size { width, height },
            params: SubplotParams::default(),
            regions: IndexMap::new(),
            lines: IndexMap::new(),
        }
    }

    pub fn id(&self) -> FigureId {
        self.id
    }

    /// Size in inches.
    pub fn size(&self) -> Size<f64> {
        self.size
    }

    /// Resize the figure. Figure-relative positions stay put; aspect-dependent
    /// decorations such as break marks need redrawing.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size { width, height };
    }

    pub fn subplot_params(&self) -> &SubplotParams {
        &self.params
    }

    pub fn set_subplot_params(&mut self, params: SubplotParams) {
        self.params = params;
    }

    /// Bounds of the cells of an evenly spaced grid over the subplot area.
    pub fn grid(&self, nrows: usize, ncols: usize) -> Vec<Rectangle<f64>> {
        GridSpec::new(nrows, ncols).cell_bounds(self.params.area(), &self.params)
    }

    /// Register a region and return its id.
    pub fn add_region(&mut self, region: Region) -> RegionId {
        let id = region.id();
        self.regions.insert(id, region);
        id
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(&id)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn regions_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.regions.values_mut()
    }

    /// Move a region, e.g. after an external layout pass. Returns `false` if
    /// the region is not on this figure.
    pub fn set_region_bounds(&mut self, id: RegionId, bounds: Rectangle<f64>) -> bool {
        match self.regions.get_mut(&id) {
            Some(region) => {
                region.set_bounds(bounds);
                true
            }
            None => false,
        }
    }

    pub fn add_line(&mut self, line: FigureLine) -> ShapeId {
        let id = ShapeId::new();
        self.lines.insert(id, line);
        id
    }

    pub fn remove_line(&mut self, id: ShapeId) -> Option<FigureLine> {
        self.lines.shift_remove(&id)
    }

    pub fn line(&self, id: ShapeId) -> Option<&FigureLine> {
        self.lines.get(&id)
    }

    pub fn lines(&self) -> impl Iterator<Item = (ShapeId, &FigureLine)> {
        self.lines.iter().map(|(id, line)| (*id, line))
    }

    /// Every figure line as a line list, two vertices per line.
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        self.lines
            .values()
            .flat_map(|line| {
                let color = [line.color.r, line.color.g, line.color.b, line.color.a];
                [line.start, line.end].map(|p| LineVertex {
                    position: [p.x as f32, p.y as f32],
                    color,
                })
            })
            .collect()
    }

    /// [`Self::line_vertices`] as raw bytes, ready for a vertex buffer.
    pub fn line_vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.line_vertices()).to_vec()
    }
}

impl Index<RegionId> for Figure {
    type Output = Region;

    /// # Panics
    ///
    /// Panics if the region does not belong to this figure.
    fn index(&self, id: RegionId) -> &Region {
        &self.regions[&id]
    }
}

impl IndexMut<RegionId> for Figure {
    fn index_mut(&mut self, id: RegionId) -> &mut Region {
        &mut self.regions[&id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridspec::GridCell;

    #[test]
    fn regions_keep_creation_order() {
        let mut fig = Figure::default();
        let a = fig.add_region(Region::new(Rectangle::default(), GridCell::single()));
        let b = fig.add_region(Region::new(Rectangle::default(), GridCell::single()));
        let ids: Vec<_> = fig.regions().map(Region::id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(fig[b].id(), b);
    }

    #[test]
    fn lines_export_as_vertices() {
        let mut fig = Figure::new(5.0, 2.0);
        assert_eq!(fig.size(), Size { width: 5.0, height: 2.0 });
        let id = fig.add_line(FigureLine {
            start: DVec2::new(0.0, 0.25),
            end: DVec2::new(0.5, 1.0),
            color: Color::BLACK,
            line_width: 0.8,
            owner: None,
        });
        let vertices = fig.line_vertices();
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].position, [0.5, 1.0]);
        assert_eq!(
            fig.line_vertex_bytes().len(),
            2 * std::mem::size_of::<LineVertex>()
        );

        assert!(fig.remove_line(id).is_some());
        assert!(fig.line_vertices().is_empty());
    }

    #[test]
    fn moving_unknown_region_fails() {
        let mut fig = Figure::default();
        let other = Region::new(Rectangle::default(), GridCell::single());
        assert!(!fig.set_region_bounds(other.id(), Rectangle::default()));
    }
}
