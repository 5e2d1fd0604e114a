//! Point-in-component hit testing with z-order tie-breaking (§4.7).

use crate::component::Component;
use crate::ids::NodeHandle;
use crate::tree::IRContext;

/// `is_point_in_component`: requires valid bounds; true iff the point is
/// in the half-open rect `[x, x+w) × [y, y+h)`.
pub fn is_point_in_component(component: &Component, x: f32, y: f32) -> bool {
    component.rendered_bounds.contains(x, y)
}

/// `find_component_at_point`: recursive descent. Rejects if `root` does
/// not contain the point. Among children that do, recurses and picks the
/// descendant with the highest effective `z_index`; ties go to the later
/// (last-rendered-on-top) child. Returns `root` itself if no child
/// produced a hit.
pub fn find_component_at_point(ctx: &IRContext, root: NodeHandle, x: f32, y: f32) -> Option<NodeHandle> {
    let component = ctx.get(root)?;
    if !is_point_in_component(component, x, y) {
        return None;
    }

    let mut best: Option<(NodeHandle, i32)> = None;
    for &child in component.children.iter() {
        if let Some(hit) = find_component_at_point(ctx, child, x, y) {
            let z = ctx.get(hit).map(|c| c.z_index).unwrap_or(0);
            // `>=` so later siblings (which recurse later, i.e. appear
            // later in this loop) win ties.
            let replace = match best {
                Some((_, best_z)) => z >= best_z,
                None => true,
            };
            if replace {
                best = Some((hit, z));
            }
        }
    }

    Some(best.map(|(handle, _)| handle).unwrap_or(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentVariant, RenderedBounds};
    use crate::ids::InstanceId;

    fn bounds(x: f32, y: f32, w: f32, h: f32) -> RenderedBounds {
        RenderedBounds { x, y, w, h, valid: true }
    }

    #[test]
    fn build_and_hit_test_two_columns() {
        let mut ctx = IRContext::new(InstanceId(0));
        let row = ctx.alloc(ComponentVariant::Row).unwrap();
        ctx.set_root(row);
        ctx.get_mut(row).unwrap().rendered_bounds = bounds(0.0, 0.0, 200.0, 50.0);

        let c1 = ctx.alloc(ComponentVariant::Column).unwrap();
        ctx.get_mut(c1).unwrap().rendered_bounds = bounds(0.0, 0.0, 100.0, 50.0);
        ctx.add_child(row, c1).unwrap();

        let c2 = ctx.alloc(ComponentVariant::Column).unwrap();
        ctx.get_mut(c2).unwrap().rendered_bounds = bounds(100.0, 0.0, 100.0, 50.0);
        ctx.add_child(row, c2).unwrap();

        let hit = find_component_at_point(&ctx, row, 150.0, 25.0).unwrap();
        assert_eq!(hit, c2);
    }

    #[test]
    fn z_ordering_breaks_ties() {
        let mut ctx = IRContext::new(InstanceId(0));
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        ctx.get_mut(root).unwrap().rendered_bounds = bounds(0.0, 0.0, 100.0, 100.0);

        let b1 = ctx.alloc(ComponentVariant::Button).unwrap();
        ctx.get_mut(b1).unwrap().rendered_bounds = bounds(0.0, 0.0, 50.0, 50.0);
        ctx.get_mut(b1).unwrap().z_index = 1;
        ctx.add_child(root, b1).unwrap();

        let b2 = ctx.alloc(ComponentVariant::Button).unwrap();
        ctx.get_mut(b2).unwrap().rendered_bounds = bounds(0.0, 0.0, 50.0, 50.0);
        ctx.get_mut(b2).unwrap().z_index = 3;
        ctx.add_child(root, b2).unwrap();

        let hit = find_component_at_point(&ctx, root, 10.0, 10.0).unwrap();
        assert_eq!(hit, b2);
    }

    #[test]
    fn empty_tree_returns_none() {
        let ctx = IRContext::new(InstanceId(0));
        let phantom = ctx.find_by_id(crate::ids::ComponentId(0));
        assert!(phantom.is_none());
    }

    #[test]
    fn point_outside_root_misses() {
        let mut ctx = IRContext::new(InstanceId(0));
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.get_mut(root).unwrap().rendered_bounds = bounds(0.0, 0.0, 10.0, 10.0);
        assert!(find_component_at_point(&ctx, root, 50.0, 50.0).is_none());
    }
}
