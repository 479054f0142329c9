use crate::component::Component;

/// Mutable pre-order traversal over component trees
///
/// Override `visit_component_mut` to act on nodes, and call
/// `walk_component_mut` to keep descending into children.
pub trait VisitorMut: Sized {
    fn visit_components_mut(&mut self, components: &mut [Component]) {
        walk_components_mut(self, components);
    }

    fn visit_component_mut(&mut self, component: &mut Component) {
        walk_component_mut(self, component);
    }
}

pub fn walk_components_mut<V: VisitorMut>(visitor: &mut V, components: &mut [Component]) {
    for component in components {
        visitor.visit_component_mut(component);
    }
}

pub fn walk_component_mut<V: VisitorMut>(visitor: &mut V, component: &mut Component) {
    for child in &mut component.children {
        visitor.visit_component_mut(child);
    }
}
