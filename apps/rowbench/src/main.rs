//! Headless demo driver: renders the screen in Light mode, switches to
//! Heavy and back via the on-screen selectors, and reports the realized
//! native-tree size after each pass.
//!
//! Run with `RUST_LOG=info cargo run -p rowbench` for per-pass logging.

use std::rc::Rc;

use rowbench::app::{dataset, home_screen, RenderMode, ITEM_COUNT};
use vtext_app_shell::{default_root_key, AppShell};
use vtext_render_headless::HeadlessRenderer;
use vtext_ui::{find_button_with_text, press_button};

fn main() {
    env_logger::init();

    let data = Rc::new(dataset(ITEM_COUNT));
    let mut shell = AppShell::new(HeadlessRenderer::new(), default_root_key(), move || {
        home_screen(Rc::clone(&data))
    });

    println!("rowbench: {ITEM_COUNT} rows, windowed materialization\n");
    report(&shell, RenderMode::Light);

    select(&mut shell, RenderMode::Heavy);
    report(&shell, RenderMode::Heavy);

    select(&mut shell, RenderMode::Light);
    report(&shell, RenderMode::Light);

    println!(
        "\nrows composed in total (cache misses across mode switches): {}",
        shell.renderer().rows_composed()
    );
}

fn select(shell: &mut AppShell<HeadlessRenderer>, mode: RenderMode) {
    let Some(root) = shell.root() else {
        log::error!("no composition root");
        return;
    };
    match find_button_with_text(shell.applier(), root, mode.label()) {
        Some(button) => {
            if let Err(err) = press_button(shell.applier(), button) {
                log::error!("press dispatch failed: {err}");
                return;
            }
            if shell.should_render() {
                shell.update();
            }
        }
        None => log::error!("selector {:?} not found", mode.label()),
    }
}

fn report(shell: &AppShell<HeadlessRenderer>, mode: RenderMode) {
    match shell.stats() {
        Some(stats) => println!("{:<26} {stats}", mode.description()),
        None => println!("{:<26} (no realized tree)", mode.description()),
    }
    shell.log_tree();
}
