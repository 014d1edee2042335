//! Dataset, row templates and the screen controller.

#![allow(non_snake_case)]

use std::rc::Rc;

use vtext_core::{named_key, useState, Key, MutableState, NodeId};
use vtext_ui::{
    composable, BoxView, Button, Color, Column, LazyColumn, LazyColumnSpec, LazyListState,
    Modifier, Row, Size, Spacer, SpannedText, Text, TextSpan,
};

pub const ITEM_COUNT: usize = 2000;

/// One immutable list row; `id` is the decimal form of its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowRecord {
    pub id: String,
}

/// Builds the full dataset once: ids `"0"` through `"count - 1"`, in order.
pub fn dataset(count: usize) -> Vec<RowRecord> {
    (0..count)
        .map(|index| RowRecord {
            id: index.to_string(),
        })
        .collect()
}

/// Which row composition the list renders with. Exactly one is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Heavy,
    Light,
}

impl RenderMode {
    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Heavy => "Scenario A: HEAVY (views)",
            RenderMode::Light => "Scenario B: LIGHT (virtual)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RenderMode::Heavy => "Heavy (native views)",
            RenderMode::Light => "Optimized (virtual nodes)",
        }
    }

    /// Identity token attached to the list request. Changing modes changes
    /// the token, which tells the host to rebuild the list from scratch.
    pub fn identity_token(self) -> Key {
        match self {
            RenderMode::Heavy => named_key("rows-heavy"),
            RenderMode::Light => named_key("rows-light"),
        }
    }
}

const DESCRIPTION_LEAD: &str = "Some Text ";
const DESCRIPTION_BODY: &str = "This is a description that renders identically in both compositions.";

mod style {
    use super::{Color, Modifier};

    pub fn screen() -> Modifier {
        Modifier::empty().background(Color(0.94, 0.94, 0.94, 1.0))
    }

    pub fn header() -> Modifier {
        Modifier::empty().fill_max_width().padding(10.0)
    }

    pub fn button(active: bool) -> Modifier {
        let background = if active {
            Color(0.30, 0.69, 0.31, 1.0)
        } else {
            Color(0.87, 0.87, 0.87, 1.0)
        };
        Modifier::empty()
            .padding(15.0)
            .background(background)
            .rounded_corners(8.0)
    }

    pub fn info_box() -> Modifier {
        Modifier::empty().padding(10.0)
    }

    pub fn row() -> Modifier {
        Modifier::empty()
            .fill_max_width()
            .padding(10.0)
            .background(Color::WHITE)
    }

    pub fn icon_box() -> Modifier {
        Modifier::empty()
            .size_points(50.0, 50.0)
            .background(Color(0.93, 0.93, 0.93, 1.0))
    }

    pub fn text_container() -> Modifier {
        Modifier::empty().fill_max_width()
    }

    pub fn title() -> Modifier {
        Modifier::empty()
    }

    pub fn description() -> Modifier {
        Modifier::empty()
    }

    pub fn tag() -> Modifier {
        Modifier::empty()
    }
}

/// Shared row scaffold. The two modes differ only in the span kinds of the
/// description; icon, title and tag composition are byte-identical so the
/// comparison stays controlled.
#[composable]
fn row_scaffold(record: &RowRecord, description: Vec<TextSpan>) -> NodeId {
    Row(style::row(), || {
        BoxView(style::icon_box(), || {});
        Column(style::text_container(), || {
            Text(format!("Title #{}", record.id), style::title());
            SpannedText(style::description(), description);
            Text("Tag", style::tag());
        });
    })
}

/// Every text fragment asks for its own native text view.
pub fn heavy_row(record: &RowRecord) -> NodeId {
    row_scaffold(
        record,
        vec![
            TextSpan::Native(DESCRIPTION_LEAD.into()),
            TextSpan::Native(DESCRIPTION_BODY.into()),
        ],
    )
}

/// The description fragments merge into the enclosing text view.
pub fn light_row(record: &RowRecord) -> NodeId {
    row_scaffold(
        record,
        vec![
            TextSpan::Virtual(DESCRIPTION_LEAD.into()),
            TextSpan::Virtual(DESCRIPTION_BODY.into()),
        ],
    )
}

#[composable]
fn selector_button(mode: &MutableState<RenderMode>, current: RenderMode, target: RenderMode) -> NodeId {
    let selection = mode.clone();
    Button(
        style::button(current == target),
        move || selection.set(target),
        || {
            Text(target.label(), Modifier::empty());
        },
    )
}

#[composable]
fn mode_selector(mode: &MutableState<RenderMode>, current: RenderMode) -> NodeId {
    Row(style::header(), || {
        selector_button(mode, current, RenderMode::Heavy);
        Spacer(Size::new(10.0, 0.0));
        selector_button(mode, current, RenderMode::Light);
    })
}

#[composable]
fn info_box(mode: RenderMode, items: usize) -> NodeId {
    Column(style::info_box(), || {
        Text(format!("Mode: {}", mode.description()), Modifier::empty());
        Text(format!("Items: {items}"), Modifier::empty());
    })
}

#[composable]
fn row_list(data: Rc<Vec<RowRecord>>, mode: RenderMode) -> NodeId {
    let key_data = Rc::clone(&data);
    LazyColumn(
        Modifier::empty().fill_max_width(),
        LazyColumnSpec::new().identity(mode.identity_token()),
        LazyListState::default(),
        move |scope| {
            scope.items(
                data.len(),
                move |index| key_data[index].id.clone(),
                move |index| match mode {
                    RenderMode::Heavy => heavy_row(&data[index]),
                    RenderMode::Light => light_row(&data[index]),
                },
            );
        },
    )
}

/// The screen controller: owns the mode selection and binds the active
/// mode's row template and identity token into the list request.
/// Initial mode is Light.
#[composable]
pub fn home_screen(data: Rc<Vec<RowRecord>>) -> NodeId {
    let mode = useState(|| RenderMode::Light);
    let current = mode.get();
    Column(style::screen(), || {
        mode_selector(&mode, current);
        info_box(current, data.len());
        row_list(data, current);
    })
}
