//! Реплики персонажей (пулы для случайного выбора).

use rand::seq::SliceRandom;
use rand::Rng;

use super::components::VoenkomConfig;

pub const TAUNTS_LOW: &[&str] = &[
    "Открывай дверь! Повестка пришла!",
    "Эй, в квартире! Выходи, распишись!",
    "Не дёргайся, это военкомат!",
    "Дверь открывай, а то сами откроем!",
    "Чего прячешься, сынок? Выходи, подпиши!",
];

pub const TAUNTS_MEDIUM: &[&str] = &[
    "Щас дверь вынесем, слышишь?!",
    "Открывай по-хорошему, потом будет по-плохому!",
    "Мы тебя всё равно достанем!",
    "Не молчи там! Соседи сказали, ты дома!",
    "Дверь ломаем через минуту, урод!",
];

pub const TAUNTS_HIGH: &[&str] = &[
    "Я знаю, ты там... Открывай тихо...",
    "Слышу твоё дыхание... Дверь откроется сама...",
    "Мама твоя уже подписала... Открывай...",
    "Щас войду без стука... Вижу тебя сквозь дверь...",
    "Ты наш... Навсегда... Беги, не спрячешься...",
];

pub const DOOR_OPENED_EARLY: &str = "Гражданин, распишитесь в повестке.";
pub const DOOR_OPENED_LATE: &str = "Ну всё, доигрался, щенок!";
pub const CAUGHT_MOVING: &str = "А ну стоять, уклонист!";

pub const STRIKE_TAUNTS: &[&str] = &["Получай!", "В армию!", "Стоять!", "Не уйдёшь!"];

pub const DEATH_LINES: &[&str] = &[
    "Вот же гад!",
    "Гори в аду!",
    "Повезло тебе, уклонист...",
    "Я ещё вернусь...",
    "I'm dead",
];

pub const PEEPHOLE_TAUNTS: &[&str] = &[
    "Я вижу, как ты там шевелишься!",
    "Чё в глазок уставился?",
    "Открывай, я знаю, что ты за дверью!",
    "Глаз убери от глазка!",
    "Хватит дышать в глазок!",
];

pub const KID_HECKLES: &[&str] = &[
    "Эй, открывай давай! Там дядьки стучат, чё ты прячешься?!",
    "Дед сказал открыть, а ты чё, боишься? Ха-ха!",
    "Там дядьки с повесткой! Открывай, я тоже посмотреть хочу!",
    "Мам, он не открывает! Скажи ему!",
    "Дверь ломать будут щас! Давай быстрее, я снимаю!",
    "Я им сказал, что ты дома! Теперь открывай!",
    "Ха-ха, тебя в армию заберут!",
    "Чё ты там сидишь как мышь? Открой, весело будет!",
];

/// Пул насмешек по уровню злости
pub fn taunt_pool(anger: f32, config: &VoenkomConfig) -> &'static [&'static str] {
    if anger < config.anger_medium {
        TAUNTS_LOW
    } else if anger < config.anger_high {
        TAUNTS_MEDIUM
    } else {
        TAUNTS_HIGH
    }
}

/// Случайная реплика из пула (пустой пул → пустая строка)
pub fn pick(pool: &[&'static str], rng: &mut impl Rng) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taunt_pool_thresholds() {
        let config = VoenkomConfig::default();
        assert_eq!(taunt_pool(0.0, &config), TAUNTS_LOW);
        assert_eq!(taunt_pool(39.9, &config), TAUNTS_LOW);
        assert_eq!(taunt_pool(40.0, &config), TAUNTS_MEDIUM);
        assert_eq!(taunt_pool(79.9, &config), TAUNTS_MEDIUM);
        assert_eq!(taunt_pool(80.0, &config), TAUNTS_HIGH);
    }
}
