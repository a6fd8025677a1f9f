//! The ordered plugin list and top-level driver (spec §4.7). Registration
//! is append-only at program start; after that, reads are lock-free since
//! nothing ever mutates the list again (spec §5).

use crate::context::FileContext;
use crate::descriptor::FileDescriptor;
use crate::error::GenError;
use crate::message_graph::MessageGraph;

/// One named code-generation pass over a file's messages. Each plugin is
/// responsible for consulting the descriptor's options and skipping
/// messages whose options disable it (spec §4.7).
pub trait Plugin {
    fn name(&self) -> &'static str;

    /// Called once, in registration order, before any `generate` call for
    /// the file currently being processed. Plugins that need no
    /// per-generator setup can leave this as a no-op.
    fn init(&mut self) {}

    fn generate(&self, ctx: &mut FileContext) -> Result<(), GenError>;
}

#[derive(Default)]
pub struct Registry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<(), GenError> {
        if self.plugins.iter().any(|p| p.name() == plugin.name()) {
            return Err(GenError::DuplicatePlugin {
                name: plugin.name().to_string(),
            });
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Runs every registered plugin over `file`, in registration order,
    /// each against its own fresh [`FileContext`]. Returns the rendered
    /// output of each plugin that produced anything, keyed by plugin
    /// name, preserving registration order.
    pub fn generate_file(
        &mut self,
        file: &FileDescriptor,
        graph: &MessageGraph,
    ) -> Result<Vec<(&'static str, String)>, GenError> {
        let mut outputs = Vec::new();
        for plugin in &mut self.plugins {
            plugin.init();
            let mut ctx = FileContext::new(file, graph);
            plugin.generate(&mut ctx)?;
            let rendered = ctx.finish();
            if !rendered.is_empty() {
                outputs.push((plugin.name(), rendered));
            }
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop(&'static str);
    impl Plugin for Noop {
        fn name(&self) -> &'static str {
            self.0
        }
        fn generate(&self, _ctx: &mut FileContext) -> Result<(), GenError> {
            Ok(())
        }
    }

    #[test]
    fn rejects_duplicate_plugin_names() {
        let mut registry = Registry::new();
        registry.register(Box::new(Noop("accessor"))).unwrap();
        let err = registry.register(Box::new(Noop("accessor"))).unwrap_err();
        assert_eq!(
            err,
            GenError::DuplicatePlugin {
                name: "accessor".to_string()
            }
        );
    }

    #[test]
    fn plugins_with_empty_output_are_omitted() {
        let mut registry = Registry::new();
        registry.register(Box::new(Noop("accessor"))).unwrap();
        let file = FileDescriptor {
            package: "p".to_string(),
            local_name: "f".to_string(),
            messages: vec![],
        };
        let graph = MessageGraph::new(std::iter::once(&file));
        let outputs = registry.generate_file(&file, &graph).unwrap();
        assert!(outputs.is_empty());
    }
}
