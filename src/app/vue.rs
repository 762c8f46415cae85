// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Les deux résultats (infixe directe / RPN) côte à côte + concordance
//
// Note :
// - Les consignes d’écriture (multiplication explicite, fonctions parenthésées)
//   sont rappelées sous le champ d’entrée.

use eframe::egui;

use super::etat::{AppCalc, Insertion, EXEMPLE};

/// Consignes d’écriture, affichées sous l’entrée.
const CONSIGNES: &str = "Opérations : + - * / ^   Fonctions : sin(x) cos(x) log(x)   Constante : pi\n\
     • arguments entre parenthèses : sin(90)\n\
     • puissance d’une fonction : (sin(90))^2\n\
     • multiplication explicite : 2 * x (pas 2x)\n\
     • nombre négatif : seulement en tête ou après '(' : (-3) * 2";

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice RPN");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée (infixe) :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 3 + 4 * 2, sin(90) + 1, 2 ^ 3 ^ 2")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
            self.focus_entree = true;
        }

        if self.entree_suspecte() {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                "Saisie incomplète ou invalide (parenthèses, opérateurs, caractères)",
            );
        }

        ui.small(CONSIGNES);

        ui.add_space(6.0);

        // Actions + précision
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface RPN + résultats + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
            self.bouton_action(ui, "Ex.", "Insère l’expression d’exemple", Action::Exemple);

            ui.separator();

            let mut arrondi = self.decimales.is_some();
            if ui.checkbox(&mut arrondi, "Arrondi").changed() {
                self.set_arrondi(arrondi);
            }
            if let Some(n) = self.decimales {
                let mut d = n as u32;
                let resp = ui.add(
                    egui::DragValue::new(&mut d)
                        .speed(1)
                        .range(0..=AppCalc::decimales_max() as u32)
                        .suffix(" décimales"),
                );
                if resp.changed() {
                    self.set_decimales(d as usize);
                }
            }
        });

        ui.add_space(8.0);

        // Touches rapides + variables + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", Insertion::ParOuvrante);
            self.bouton_insert(ui, ")", ")", Insertion::ParFermante);

            self.bouton_insert(ui, "+", "+", Insertion::Operateur);
            self.bouton_insert(ui, "-", "-", Insertion::Operateur);
            self.bouton_insert(ui, "*", "*", Insertion::Operateur);
            self.bouton_insert(ui, "/", "/", Insertion::Operateur);
            self.bouton_insert(ui, "^", "^", Insertion::Operateur);

            ui.separator();

            self.bouton_insert(ui, "pi", "pi", Insertion::Mot);
            self.bouton_insert(ui, "sin", "sin(", Insertion::Fonction);
            self.bouton_insert(ui, "cos", "cos(", Insertion::Fonction);
            self.bouton_insert(ui, "log", "log(", Insertion::Fonction);

            ui.separator();

            // Variables : la RPN est produite, l’évaluation est sautée
            self.bouton_insert(ui, "x", "x", Insertion::Mot);
            self.bouton_insert(ui, "y", "y", Insertion::Mot);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
                self.focus_entree = true;
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_rpn")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"]] {
                    for chiffre in ligne {
                        self.bouton_insert(ui, chiffre, chiffre, Insertion::Chiffre);
                    }
                    match ligne[0] {
                        "7" => self.bouton_action(
                            ui,
                            "DEL",
                            "Efface le dernier symbole",
                            Action::Backspace,
                        ),
                        "4" => self.bouton_insert(ui, "/", "/", Insertion::Operateur),
                        _ => self.bouton_insert(ui, ".", ".", Insertion::Chiffre),
                    }
                    ui.end_row();
                }

                self.bouton_insert(ui, "0", "0", Insertion::Chiffre);
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("RPN (postfixe) :");
        Self::champ_monospace(ui, "rpn_out", &self.postfixe, 1);

        ui.add_space(6.0);

        if self.resultats_dispo {
            ui.label("Résultat (évaluation infixe directe) :");
            Self::champ_monospace(ui, "infixe_out", &self.resultat_infixe, 1);
            ui.label("Résultat (évaluation de la RPN) :");
            Self::champ_monospace(ui, "postfixe_out", &self.resultat_postfixe, 1);

            match self.concordance {
                Some(true) => {
                    ui.monospace("Concordance : les deux évaluations donnent la même valeur");
                }
                Some(false) => {
                    ui.colored_label(
                        ui.visuals().warn_fg_color,
                        "Divergence : les deux évaluations ne concordent pas",
                    );
                }
                None => {}
            }
        } else if !self.demarche.variables.is_empty() {
            ui.monospace(format!(
                "Variables : {} (évaluation non effectuée)",
                self.demarche.variables
            ));
        } else {
            ui.monospace("Résultat : indisponible");
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(
                    ui,
                    "Variables",
                    "demarche_variables",
                    &self.demarche.variables,
                );
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.retour_arriere(),
                Action::Exemple => self.entree = EXEMPLE.to_string(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, texte: &str, genre: Insertion) {
        if ui.add_sized([46.0, 28.0], egui::Button::new(label)).clicked() {
            self.inserer(texte, genre);
        }
    }

    /// Traite l’expression via le noyau, puis dépose RPN/résultats/démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let s = self.entree.trim();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            self.focus_entree = true;
            return;
        }

        match crate::noyau::eval_expression(s) {
            Ok(rapport) => self.set_rapport(&rapport),
            Err(e) => {
                tracing::debug!(erreur = %e, "expression rejetée");
                self.set_erreur(e.to_string());
            }
        }
        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
    Exemple,
}
