//! Речь персонажей: параметры фразы и "is speaking" gate.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Длительность произнесения одного символа (секунды)
pub const SECONDS_PER_CHAR: f32 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum Speaker {
    Voenkom,
    Kid,
}

impl Speaker {
    /// Префикс для статусного сообщения
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Voenkom => "ВОЕНКОМ",
            Speaker::Kid => "РЕБЕНОК",
        }
    }
}

/// Одна фраза для speech synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechLine {
    pub speaker: Speaker,
    pub text: String,
    pub volume: f32,
    pub rate: f32,
    pub pitch: f32,
}

impl SpeechLine {
    pub fn new(speaker: Speaker, text: impl Into<String>, volume: f32, rate: f32, pitch: f32) -> Self {
        Self {
            speaker,
            text: text.into(),
            volume,
            rate,
            pitch,
        }
    }

    /// Оценка длительности произнесения (секунды)
    pub fn duration_secs(&self) -> f32 {
        self.text.chars().count() as f32 * SECONDS_PER_CHAR
    }

    /// Строка для статусного сообщения: `ВОЕНКОМ: "текст"`
    pub fn caption(&self) -> String {
        format!("{}: \"{}\"", self.speaker.label(), self.text)
    }
}

/// Resource: занят ли speech collaborator.
///
/// Без внешнего сигнала: оценка по длительности последней фразы
/// (новая фраза прерывает предыдущую). Presentation может выставить
/// `external_busy`, если знает реальное состояние синтезатора.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpeechStatus {
    remaining: f32,
    pub external_busy: bool,
}

impl SpeechStatus {
    pub fn is_speaking(&self) -> bool {
        self.external_busy || self.remaining > 0.0
    }

    pub fn note_spoken(&mut self, line: &SpeechLine) {
        self.remaining = line.duration_secs();
    }

    pub fn tick(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_counts_characters_not_bytes() {
        let line = SpeechLine::new(Speaker::Voenkom, "Стой", 1.0, 1.0, 0.2);
        assert!((line.duration_secs() - 0.32).abs() < 1e-5);
    }

    #[test]
    fn test_speech_status_expires() {
        let mut status = SpeechStatus::default();
        assert!(!status.is_speaking());

        status.note_spoken(&SpeechLine::new(Speaker::Kid, "Эй!", 0.8, 1.1, 1.4));
        assert!(status.is_speaking());

        status.tick(0.1);
        assert!(status.is_speaking());
        status.tick(0.2);
        assert!(!status.is_speaking());
    }

    #[test]
    fn test_caption_format() {
        let line = SpeechLine::new(Speaker::Voenkom, "Открывай", 1.0, 1.0, 0.2);
        assert_eq!(line.caption(), "ВОЕНКОМ: \"Открывай\"");
    }
}
