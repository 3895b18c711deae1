use serde::Serialize;

use super::types::{SankeyLink, SankeyNode};

/// Control coordinates for drawing a link as a horizontal cubic curve from
/// `(x0, y0)` to `(x1, y1)`, with handles at `(x2, y0)` and `(x3, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkPath {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub x3: f64,
}

impl LinkPath {
    pub fn to_svg_d(&self) -> String {
        format!(
            "M{},{}C{},{} {},{} {},{}",
            self.x0, self.y0, self.x2, self.y0, self.x3, self.y1, self.x1, self.y1
        )
    }
}

pub(super) fn link_path(
    link: &SankeyLink,
    source: &SankeyNode,
    target: &SankeyNode,
    curvature: f64,
) -> LinkPath {
    let x0 = source.x + source.dx;
    let x1 = target.x;
    let lerp = |t: f64| x0 * (1.0 - t) + x1 * t;
    LinkPath {
        x0,
        y0: source.y + link.sy + link.dy / 2.0,
        x1,
        y1: target.y + link.ty + link.dy / 2.0,
        x2: lerp(curvature),
        x3: lerp(1.0 - curvature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{LinkId, NodeId};

    #[test]
    fn handles_follow_curvature() {
        let mut source = SankeyNode::new(NodeId(0), "a".into(), "a".into());
        source.x = 0.0;
        source.dx = 20.0;
        source.y = 10.0;
        let mut target = SankeyNode::new(NodeId(1), "b".into(), "b".into());
        target.x = 120.0;
        target.y = 40.0;
        let mut link = SankeyLink::new(LinkId(0), NodeId(0), NodeId(1), 1.0);
        link.dy = 8.0;
        link.sy = 2.0;
        link.ty = 4.0;

        let path = link_path(&link, &source, &target, 0.25);
        assert_eq!(path.x0, 20.0);
        assert_eq!(path.x1, 120.0);
        assert_eq!(path.x2, 45.0);
        assert_eq!(path.x3, 95.0);
        assert_eq!(path.y0, 16.0);
        assert_eq!(path.y1, 48.0);
        assert_eq!(path.to_svg_d(), "M20,16C45,16 95,48 120,48");
    }
}
