use chrono::Datelike;

pub use crate::format::{
    Anlage, AnlageTyp, Ansicht, Datum, Einstellungen, Ereignis, Kauf, Simulation, SimulationsJahr,
    SteuerEinstellungen, String, TerminJahr, Zahl, Zinssatz,
};

/// Reiner Ansichts-Zustand: entweder die gesamte Laufzeit oder ein einzelnes
/// Jahr, kombiniert mit einer der drei [`Ansicht`]en.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filter {
    pub jahr: Option<i32>,
    pub ansicht: Ansicht,
}

impl Filter {
    pub fn enthält(&self, datum: Datum) -> bool {
        self.jahr.map_or(true, |jahr| datum.year() == jahr)
    }

    /// Der 31. Dezember des gefilterten Jahres.
    pub fn jahresende(&self) -> Option<Datum> {
        self.jahr
            .map(|jahr| Datum::from_ymd_opt(jahr, 12, 31).unwrap())
    }
}

/// Vollständig berechnete Kennzahlen einer Anlage unter einem [`Filter`].
/// Wird nie gespeichert, sondern bei Bedarf neu abgeleitet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kennzahlen {
    /// Verfügbare Stückzahl: gekauft minus verkauft, nie negativ.
    pub bestand: Zahl,
    /// Gekaufte Stückzahl × Kaufpreis; bei Zinskonten die Netto-Einzahlungen.
    pub kaufwert: Zahl,
    /// Einstandswert des verbliebenen Bestands.
    pub einstand: Zahl,
    /// Bestand × aktueller Kurs; Null bei unbekanntem Kurs.
    pub marktwert: Zahl,
    /// Realisiertes Ergebnis über die gesamte Laufzeit.
    pub realisiert: Zahl,
    /// Realisiertes Ergebnis der Verkäufe im gefilterten Jahr.
    pub realisiert_jahr: Zahl,
    /// Was die gewählte Ansicht davon zeigt: in der Bestands-Ansicht Null.
    pub realisiert_anzeige: Zahl,
    pub unrealisiert: Zahl,
    /// (realisiert_anzeige + unrealisiert) / kaufwert, als Faktor.
    pub rendite: Zahl,
    pub steuerbar: Steuerbar,
}

/// Steuerlich relevante Beträge des gefilterten Jahres.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steuerbar {
    pub zinsen: Zahl,
    pub dividenden: Zahl,
    /// Realisierte Kursgewinne aus Aktien, Anleihen und Fonds (§ 20 EStG).
    pub kursgewinne: Zahl,
    /// Kurzfristige Krypto-Gewinne innerhalb der Spekulationsfrist (§ 23 EStG).
    pub krypto_gewinne: Zahl,
    /// Kurzfristige Krypto-Verluste, als positiver Betrag geführt.
    pub krypto_verluste: Zahl,
}

impl std::ops::AddAssign for Steuerbar {
    fn add_assign(&mut self, rhs: Self) {
        self.zinsen += rhs.zinsen;
        self.dividenden += rhs.dividenden;
        self.kursgewinne += rhs.kursgewinne;
        self.krypto_gewinne += rhs.krypto_gewinne;
        self.krypto_verluste += rhs.krypto_verluste;
    }
}
