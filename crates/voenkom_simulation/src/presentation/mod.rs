//! Presentation bridge: всё, что ядро отдаёт наружу (речь, звуки, UI).
//!
//! Архитектура:
//! - Ядро пишет events (SpeechRequest, CueRequest, UiEvent), presentation их дренит
//! - Обратно приходят только SessionCommand (start/restart/accept/reject)
//! - Единственный query к speech collaborator: SpeechStatus::is_speaking()

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::session::SessionState;
use crate::SimulationSet;

pub mod speech;

pub use speech::{SpeechLine, SpeechStatus, Speaker};

/// Звуковые cue (синтезируются presentation слоем)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AudioCue {
    /// Стук в дверь (Waiting)
    Knock,
    /// Дверной звонок (один раз за игру)
    DoorBell,
    /// Жуткий drone после минуты ожидания
    Scary,
    /// Удар по военкому или по игроку
    Hit,
    /// Melee попал в стену/дверь
    WallHit,
    /// Взмах melee оружием
    Swing,
    /// Выстрел
    Gunshot,
    /// Щелчок пустого магазина
    EmptyClick,
}

/// Event: произнести фразу (fire-and-forget)
#[derive(Event, Debug, Clone)]
pub struct SpeechRequest(pub SpeechLine);

/// Event: проиграть звуковой cue
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueRequest(pub AudioCue);

/// Event: изменения UI
#[derive(Event, Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Показать prompt повестки [Y/N]
    ShowSummons,
    /// Убрать prompt повестки
    HideSummons,
    /// Статусное сообщение изменилось
    Message(String),
    /// Подсказка взаимодействия изменилась (пустая строка = скрыть)
    InteractionHint(String),
    /// Прогресс задержания (секунды неподвижности)
    DetentionProgress(f32),
}

/// Event: решения игрока, приходящие из UI
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Restart,
    AcceptSummons,
    RejectSummons,
}

/// Система: публикует изменения message / interaction_text как UiEvent.
///
/// Session хранит строки как state; presentation получает только diff.
pub fn publish_presentation_state(
    session: Res<SessionState>,
    mut published: Local<(String, String)>,
    mut ui_events: EventWriter<UiEvent>,
) {
    let (message, hint) = &mut *published;

    if *message != session.message {
        message.clone_from(&session.message);
        ui_events.write(UiEvent::Message(message.clone()));
    }

    if *hint != session.interaction_text {
        hint.clone_from(&session.interaction_text);
        ui_events.write(UiEvent::InteractionHint(hint.clone()));
    }
}

/// Presentation Plugin: events моста + публикация строк в конце тика
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpeechStatus>()
            .add_event::<SpeechRequest>()
            .add_event::<CueRequest>()
            .add_event::<UiEvent>()
            .add_event::<SessionCommand>();

        app.add_systems(
            FixedUpdate,
            publish_presentation_state.in_set(SimulationSet::Presentation),
        );
    }
}
