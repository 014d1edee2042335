//! Orchestration shell: owns the composition, the compositing backend and
//! the render loop glue between them.

use vtext_core::{location_key, Composition, Key, MemoryApplier, NodeId};
use vtext_render_common::{NativeTreeStats, NativeViewTree, Renderer};

pub struct AppShell<R: Renderer> {
    composition: Composition,
    renderer: R,
    root_key: Key,
    content: Box<dyn FnMut() -> NodeId>,
}

impl<R: Renderer> AppShell<R> {
    /// Builds the shell and performs the initial render pass.
    pub fn new(renderer: R, root_key: Key, content: impl FnMut() -> NodeId + 'static) -> Self {
        let mut shell = Self {
            composition: Composition::new(),
            renderer,
            root_key,
            content: Box::new(content),
        };
        // Consume the runtime's initial frame request.
        shell.composition.take_frame_request();
        shell.render();
        shell
    }

    /// True when a state write since the last pass requests a recomposition.
    pub fn should_render(&self) -> bool {
        self.composition.take_frame_request()
    }

    /// Recomposes and realizes the tree.
    pub fn update(&mut self) {
        self.render();
    }

    fn render(&mut self) {
        let content = &mut self.content;
        if let Err(err) = self.composition.render(self.root_key, || content()) {
            log::error!("composition failed: {err}");
            return;
        }
        let Some(root) = self.composition.root() else {
            return;
        };
        if let Err(err) = self.renderer.rebuild(self.composition.applier_mut(), root) {
            log::error!("renderer rebuild failed: {err:?}");
            return;
        }
        if let Some(stats) = self.stats() {
            log::info!("realized {stats}");
        }
    }

    pub fn tree(&self) -> Option<&NativeViewTree> {
        self.renderer.tree()
    }

    pub fn stats(&self) -> Option<NativeTreeStats> {
        self.renderer.tree().map(NativeViewTree::stats)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.composition.root()
    }

    pub fn applier(&self) -> &MemoryApplier {
        self.composition.applier()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn log_tree(&self) {
        if let Some(tree) = self.renderer.tree() {
            log::debug!("native view tree:\n{}", tree.describe());
        }
        log::debug!(
            "composed nodes:\n{}",
            self.composition.applier().dump_tree(self.composition.root())
        );
    }
}

pub fn default_root_key() -> Key {
    location_key(file!(), line!(), column!())
}
