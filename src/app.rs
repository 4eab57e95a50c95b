// src/app.rs
//
// Calculatrice — module App (racine)
// ---------------------------------
// Rôle:
// - Déclarer les sous-modules (état, vue, clavier, config)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier : à chaque frame, les touches reçues par egui sont diffusées au
// `Document` ; seul l’écouteur attaché par la vue calculatrice y réagit.

pub mod clavier;
pub mod config;
pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use config::Config;
pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Un champ texte avec le focus garde ses touches (équivalent egui de stopPropagation).
        if !ctx.wants_keyboard_input() {
            let touches = ctx.input(|i| clavier::touches_depuis_egui(&i.events));
            let empechees = self.pomper_clavier(&touches);
            // action par défaut empêchée : les widgets dessinés ensuite ne la voient pas
            ctx.input_mut(|i| clavier::retirer_des_evenements(&mut i.events, &empechees));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
