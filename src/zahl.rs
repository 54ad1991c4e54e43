//! Der numerische Kern: exakte Dezimalzahlen für alles Geld, Stück und
//! jede Quote. Gleitkommazahlen kommen in den Berechnungen nicht vor.

use num_traits::Zero;
use rust_decimal::RoundingStrategy;

pub use rust_decimal::Decimal as Zahl;

/// Kaufmännische Rundung auf `stellen` Nachkommastellen.
pub fn runde(zahl: Zahl, stellen: u32) -> Zahl {
    zahl.round_dp_with_strategy(stellen, RoundingStrategy::MidpointAwayFromZero)
}

/// `zähler / nenner`, mit 0 als Ergebnis bei leerem Nenner.
pub fn anteil(zähler: Zahl, nenner: Zahl) -> Zahl {
    if nenner.is_zero() {
        Zahl::zero()
    } else {
        zähler / nenner
    }
}

/// Prozentsatz als Faktor, `3.65 => 0.0365`.
pub fn als_faktor(prozent: Zahl) -> Zahl {
    prozent / Zahl::ONE_HUNDRED
}
