// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Chaque bouton envoie une Operation au même dispatch que le clavier
// - Écran : texte du tampon, aligné à droite, monospace
// - Panneaux repliables : historique + démarche (jetons / RPN)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::{Operateur, Operation, Parenthese};

/// Taille d’une touche du pavé.
const TOUCHE: [f32; 2] = [64.0, 40.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        let visible = self.calculatrice_visible();
        let libelle = if visible {
            "▼ Cacher la calculatrice"
        } else {
            "Calculatrice ▲"
        };
        if ui.button(libelle).clicked() {
            self.afficher_calculatrice(!visible);
        }

        if !self.calculatrice_visible() {
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(self.config.titre.as_str());
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();

                self.ui_historique(ui);
                self.ui_demarche(ui);
            });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(self.texte_courant())
                            .monospace()
                            .size(28.0),
                    );
                    if self.resultat_affiche() {
                        ui.weak("=");
                    }
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let op = Operation::Operateur;

        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, "AC", "Tout effacer (Échap, C)", Operation::Effacer);
                self.touche(ui, "DEL", "Effacer le dernier caractère", Operation::Retour);
                self.touche(ui, "%", "Diviser le dernier nombre par 100", Operation::Pourcent);
                self.touche(ui, "÷", "/", op(Operateur::Divise));
                ui.end_row();

                self.chiffres(ui, [7, 8, 9]);
                self.touche(ui, "×", "*", op(Operateur::Fois));
                ui.end_row();

                self.chiffres(ui, [4, 5, 6]);
                self.touche(ui, "-", "-", op(Operateur::Moins));
                ui.end_row();

                self.chiffres(ui, [1, 2, 3]);
                self.touche(ui, "+", "+", op(Operateur::Plus));
                ui.end_row();

                self.touche(ui, "+/-", "Changer le signe du dernier nombre", Operation::Signe);
                self.touche(ui, "0", "0", Operation::Chiffre(0));
                self.touche(ui, ".", ".", Operation::Decimale);
                self.touche(ui, "=", "Entrée, =", Operation::Evaluer);
                ui.end_row();

                self.touche(ui, "(", "(", Operation::Parenthese(Parenthese::Ouvrante));
                self.touche(ui, ")", ")", Operation::Parenthese(Parenthese::Fermante));
                ui.end_row();
            });
    }

    fn chiffres(&mut self, ui: &mut egui::Ui, ds: [u8; 3]) {
        for d in ds {
            self.touche(ui, &d.to_string(), &d.to_string(), Operation::Chiffre(d));
        }
    }

    fn touche(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, op: Operation) {
        let resp = ui
            .add_sized(TOUCHE, egui::Button::new(egui::RichText::new(label).size(18.0)))
            .on_hover_text(tip);
        if resp.clicked() {
            self.dispatch(op);
            // sinon Entrée « recliquerait » le bouton en plus d’évaluer
            resp.surrender_focus();
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        if self.config.historique_max == 0 {
            return;
        }
        egui::CollapsingHeader::new("Historique")
            .default_open(false)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("aucun calcul");
                    return;
                }
                for ligne in &self.historique {
                    ui.monospace(format!("{} = {}", ligne.expression, ligne.resultat));
                }
                if ui.small_button("Vider").clicked() {
                    self.vider_historique();
                }
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", &self.demarche.rpn);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        ui.monospace(if contenu.is_empty() { "—" } else { contenu });
    }
}
