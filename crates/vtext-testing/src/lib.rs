//! Testing harness: composes content headlessly and drives it the way a
//! user would, by pressing labeled buttons.

use vtext_app_shell::{default_root_key, AppShell};
use vtext_core::{MemoryApplier, NodeId};
use vtext_render_common::{NativeTreeStats, NativeViewTree};
use vtext_render_headless::HeadlessRenderer;
use vtext_ui::{find_button_with_text, press_button};

pub struct TestComposition {
    shell: AppShell<HeadlessRenderer>,
}

/// Renders `content` once under a headless backend.
pub fn run_test_composition(content: impl FnMut() -> NodeId + 'static) -> TestComposition {
    TestComposition {
        shell: AppShell::new(HeadlessRenderer::new(), default_root_key(), content),
    }
}

impl TestComposition {
    /// Recomposes when a state write is pending; returns whether it did.
    pub fn recompose_if_needed(&mut self) -> bool {
        if self.shell.should_render() {
            self.shell.update();
            true
        } else {
            false
        }
    }

    /// Presses the button labeled `label` and recomposes. Panics when no
    /// such button exists; a missing control is a test bug.
    pub fn press(&mut self, label: &str) {
        let root = self.shell.root().expect("composition root");
        let button = find_button_with_text(self.shell.applier(), root, label)
            .unwrap_or_else(|| panic!("no button labeled {label:?}"));
        press_button(self.shell.applier(), button).expect("press dispatch");
        self.recompose_if_needed();
    }

    pub fn tree(&self) -> &NativeViewTree {
        self.shell.tree().expect("realized tree")
    }

    pub fn stats(&self) -> NativeTreeStats {
        self.tree().stats()
    }

    pub fn text_content(&self) -> Vec<String> {
        self.tree().text_content()
    }

    /// Cumulative list-row compositions performed by the backend.
    pub fn rows_composed(&self) -> usize {
        self.shell.renderer().rows_composed()
    }

    pub fn root(&self) -> NodeId {
        self.shell.root().expect("composition root")
    }

    pub fn applier(&self) -> &MemoryApplier {
        self.shell.applier()
    }
}
