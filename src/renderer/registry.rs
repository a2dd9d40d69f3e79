//! Registry of renderers and the policy for picking one.
//!
//! # Selection Policy
//!
//! 1. A requested name must match a registered renderer exactly
//! 2. Without a request, a configured override name must match exactly
//! 3. Otherwise the available renderer with the lowest [`Priority`] wins,
//!    earlier registrations breaking ties
//!
//! Unavailable renderers are never picked, not even by name.

use super::{Priority, Renderer, TerminalRenderer};
use crate::domain::{MenuError, Result};

/// Ordered collection of renderers.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: Vec<Box<dyn Renderer>>,
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.renderers.iter().map(|r| (r.name(), r.priority())))
            .finish()
    }
}

impl RendererRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in renderer.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TerminalRenderer::new()));
        registry
    }

    /// Adds a renderer.
    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        tracing::debug!(
            name = renderer.name(),
            priority = ?renderer.priority(),
            available = renderer.is_available(),
            "renderer registered"
        );
        self.renderers.push(renderer);
    }

    /// Names and priorities of registered renderers, in registration order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, Priority)> {
        self.renderers.iter().map(|r| (r.name(), r.priority())).collect()
    }

    /// Resolves which renderer to use.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::RendererNotFound`] if a requested or override
    /// name matches no available renderer, and [`MenuError::NoRenderer`] if
    /// nothing is available at all.
    pub fn resolve(&self, requested: Option<&str>, override_name: Option<&str>) -> Result<usize> {
        if let Some(name) = requested.or(override_name) {
            let index = self
                .renderers
                .iter()
                .position(|r| r.name() == name && r.is_available())
                .ok_or_else(|| MenuError::RendererNotFound(name.to_string()))?;
            tracing::debug!(name, explicit = requested.is_some(), "renderer picked by name");
            return Ok(index);
        }

        let (index, renderer) = self
            .renderers
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_available())
            .min_by_key(|(index, r)| (r.priority(), *index))
            .ok_or(MenuError::NoRenderer)?;
        tracing::debug!(name = renderer.name(), "renderer picked by priority");
        Ok(index)
    }

    /// Borrows the renderer [`resolve`](Self::resolve) picks.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn select(
        &mut self,
        requested: Option<&str>,
        override_name: Option<&str>,
    ) -> Result<&mut dyn Renderer> {
        let index = self.resolve(requested, override_name)?;
        Ok(self.renderers[index].as_mut())
    }

    /// Takes the renderer [`resolve`](Self::resolve) picks out of the registry.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn into_selected(
        mut self,
        requested: Option<&str>,
        override_name: Option<&str>,
    ) -> Result<Box<dyn Renderer>> {
        let index = self.resolve(requested, override_name)?;
        Ok(self.renderers.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Key;
    use crate::ui::MenuView;

    struct Fake {
        name: &'static str,
        priority: Priority,
        available: bool,
    }

    impl Renderer for Fake {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> Priority {
            self.priority
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn render(&mut self, _view: &MenuView) -> Result<()> {
            Ok(())
        }

        fn poll_key(&mut self) -> Result<(Key, u32)> {
            Ok((Key::Escape, 0))
        }
    }

    fn registry(entries: &[(&'static str, Priority, bool)]) -> RendererRegistry {
        let mut registry = RendererRegistry::new();
        for &(name, priority, available) in entries {
            registry.register(Box::new(Fake {
                name,
                priority,
                available,
            }));
        }
        registry
    }

    #[test]
    fn terminal_class_wins_by_default() {
        let mut reg = registry(&[("wayland", Priority::Gui, true), ("curses", Priority::Terminal, true)]);
        assert_eq!(reg.select(None, None).unwrap().name(), "curses");
    }

    #[test]
    fn unavailable_renderers_are_skipped() {
        let mut reg = registry(&[("curses", Priority::Terminal, false), ("x11", Priority::Gui, true)]);
        assert_eq!(reg.select(None, None).unwrap().name(), "x11");
        assert!(matches!(
            reg.resolve(Some("curses"), None),
            Err(MenuError::RendererNotFound(name)) if name == "curses"
        ));
    }

    #[test]
    fn ties_go_to_first_registered() {
        let reg = registry(&[("x11", Priority::Gui, true), ("wayland", Priority::Gui, true)]);
        assert_eq!(reg.resolve(None, None).unwrap(), 0);
    }

    #[test]
    fn requested_name_beats_override_and_priority() {
        let mut reg = registry(&[("curses", Priority::Terminal, true), ("x11", Priority::Gui, true)]);
        assert_eq!(reg.select(Some("x11"), Some("curses")).unwrap().name(), "x11");
        assert_eq!(reg.select(None, Some("x11")).unwrap().name(), "x11");
    }

    #[test]
    fn names_must_match_exactly() {
        let reg = registry(&[("curses", Priority::Terminal, true)]);
        assert!(matches!(reg.resolve(Some("Curses"), None), Err(MenuError::RendererNotFound(_))));
        assert!(matches!(reg.resolve(None, Some("curse")), Err(MenuError::RendererNotFound(_))));
    }

    #[test]
    fn empty_registry_has_no_renderer() {
        let reg = RendererRegistry::new();
        assert!(matches!(reg.resolve(None, None), Err(MenuError::NoRenderer)));
    }

    #[test]
    fn into_selected_hands_out_the_renderer() {
        let reg = registry(&[("x11", Priority::Gui, true), ("curses", Priority::Terminal, true)]);
        let renderer = reg.into_selected(None, None).unwrap();
        assert_eq!(renderer.name(), "curses");
    }
}
