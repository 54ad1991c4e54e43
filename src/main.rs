use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use globset::GlobBuilder;
use walkdir::WalkDir;

use depotrechner::*;

use depot::depot_auswerten;
use kennzahlen::kennzahlen_berechnen;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pfade zu den Depot-Dateien
    daten: Vec<PathBuf>,

    /// TSV Ausgabe aktivieren
    #[arg(short, long)]
    tsv: bool,

    /// Für welches Jahr die Auswertung erfolgen soll
    #[arg(short, long)]
    jahr: Option<i32>,

    /// Welche Ansicht gilt
    #[arg(short, long, value_enum, default_value = "kombiniert")]
    ansicht: Ansicht,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let heute = chrono::Local::now().date_naive();
    let filter = Filter {
        jahr: args.jahr,
        ansicht: args.ansicht,
    };

    let (mut anlagen, einstellungen) = finde_alle_daten(args.daten)?;
    anlagen.sort_by(|a, b| (&a.typ, &a.name).cmp(&(&b.typ, &b.name)));

    let anlagen: Vec<(Anlage, Kennzahlen)> = anlagen
        .into_iter()
        .map(|anlage| {
            let kennzahlen = kennzahlen_berechnen(&anlage, filter, heute);
            (anlage, kennzahlen)
        })
        .collect();

    let auswertung = depot_auswerten(&anlagen, filter, &einstellungen);
    let verteilung = depot::nach_symbol(&anlagen, filter);

    let mut w = std::io::stdout().lock();

    if args.tsv {
        write!(w, "{}", tsv::TsvTitel)?;
        for (anlage, kennzahlen) in &anlagen {
            if !depot::ist_ausgewählt(anlage, kennzahlen, filter) {
                continue;
            }
            write!(w, "{}", tsv::TsvAnlage { anlage, kennzahlen })?;
        }
        for zeile in &auswertung.zeilen {
            write!(w, "{}", tsv::TsvZeile { zeile })?;
        }
        write!(w, "{}", tsv::TsvZeile { zeile: &auswertung.summen })?;
        return Ok(());
    }

    write!(w, "{}", bericht::BerichtKopf { filter, stichtag: heute })?;
    for (anlage, kennzahlen) in &anlagen {
        if !depot::ist_ausgewählt(anlage, kennzahlen, filter) {
            continue;
        }
        write!(w, "{}", bericht::BerichtAnlage { anlage, kennzahlen })?;
    }
    write!(
        w,
        "{}",
        bericht::BerichtZeilen {
            zeilen: &auswertung.zeilen,
            summen: &auswertung.summen,
        }
    )?;
    if !verteilung.is_empty() {
        write!(w, "{}", bericht::BerichtVerteilung { verteilung: &verteilung })?;
    }
    if let Some(steuer) = &auswertung.steuer {
        write!(w, "{}", bericht::BerichtSteuer { steuer })?;
    }

    Ok(())
}

fn finde_alle_daten(daten: Vec<PathBuf>) -> Result<(Vec<Anlage>, Einstellungen)> {
    let mut anlagen = Vec::new();
    let mut einstellungen = Einstellungen::default();

    let glob = GlobBuilder::new("**/*.{yml,yaml}")
        .case_insensitive(true)
        .build()?
        .compile_matcher();

    for pfad in daten {
        for entry in WalkDir::new(pfad).sort_by_file_name() {
            let entry = entry?;
            let pfad = entry.path();
            if !glob.is_match(pfad) {
                continue;
            }
            let rdr =
                fs::File::open(pfad).with_context(|| format!("Öffnen von `{}`", pfad.display()))?;
            let datei: format::Datei = serde_yaml::from_reader(rdr)
                .with_context(|| format!("Einlesen von `{}`", pfad.display()))?;

            match datei {
                format::Datei::Anlage(anlage) => anlagen.push(*anlage),
                format::Datei::Einstellungen(gelesen) => {
                    if gelesen.steuern.is_some() {
                        einstellungen.steuern = gelesen.steuern;
                    }
                    einstellungen.termingeschäfte.extend(gelesen.termingeschäfte);
                    if gelesen.simulation.is_some() {
                        einstellungen.simulation = gelesen.simulation;
                    }
                }
            }
        }
    }

    tracing::debug!(
        anlagen = anlagen.len(),
        termingeschäfte = einstellungen.termingeschäfte.len(),
        "Daten eingelesen"
    );
    Ok((anlagen, einstellungen))
}
