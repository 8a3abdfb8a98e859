//! GUI renderer (reads state, produces widgets; no mutation).
//!
//! One screen: title, status line, transport row, source toggle, and the
//! whole-seconds position readout once the media has reported itself.

use iced::Alignment;
use iced::widget::{Column, button, column, row, text};

use super::state::{Message, Mirador, SEEK_STEP_SECS};
use super::util;

pub(crate) fn view(state: &Mirador) -> Column<'_, Message> {
    let mut page = column![
        text("Mirador"),
        text(&state.status_line).size(14),
        transport_row(state),
        source_toggle(state),
    ]
    .spacing(12)
    .padding(16);

    if let Some(readout) = util::format_readout(state.facade.last_status()) {
        page = page.push(text(readout).size(14));
    }

    page
}

fn transport_row(state: &Mirador) -> iced::widget::Row<'_, Message> {
    let play_label = if state.facade.is_playing() {
        "Pause"
    } else {
        "Play"
    };

    // No on_press while no player is bound (the facade would ignore the
    // command anyway; the buttons just say so).
    let bound = state.facade.is_bound();

    let back_btn = button(text(format!("« {SEEK_STEP_SECS}s")));
    let back_btn = if bound {
        back_btn.on_press(Message::SeekBy(-SEEK_STEP_SECS))
    } else {
        back_btn
    };

    let play_btn = button(play_label);
    let play_btn = if bound {
        play_btn.on_press(Message::TogglePlayPause)
    } else {
        play_btn
    };

    let stop_btn = button("Stop");
    let stop_btn = if bound {
        stop_btn.on_press(Message::Stop)
    } else {
        stop_btn
    };

    let forward_btn = button(text(format!("{SEEK_STEP_SECS}s »")));
    let forward_btn = if bound {
        forward_btn.on_press(Message::SeekBy(SEEK_STEP_SECS))
    } else {
        forward_btn
    };

    row![back_btn, play_btn, stop_btn, forward_btn]
        .spacing(8)
        .align_y(Alignment::Center)
}

fn source_toggle(state: &Mirador) -> iced::widget::Button<'_, Message> {
    let label = format!("Source: {}", state.facade.active_source().label());
    button(text(label)).on_press(Message::ToggleSource)
}
