// src/noyau/tampon.rs
//
// Tampon d’expression (texte affiché + drapeau "résultat affiché")
// ---------------------------------------------------------------
// Contrats :
// - Transitions pures : chaque opération lit le tampon courant et rend le SUIVANT.
// - Jamais deux opérateurs binaires adjacents (un opérateur remplace l’opérateur final).
// - "Error" est un état distingué : seuls C et ⌫ (qui efface aussi) en sortent.
// - Départ à neuf : après un résultat, sur "0" ou sur "Error", le prochain chiffre
//   (ou parenthèse) remplace le texte au lieu de s’y ajouter.

use super::erreur::ErreurEval;
use super::eval::{eval_expression, Evaluation};
use super::format::pourcent;
use super::suffixe::{nombre_final, Forme};

/// Texte de l’état d’erreur.
pub const ERREUR: &str = "Error";

/// Texte du tampon vide.
pub const ZERO: &str = "0";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operateur {
    pub const TOUS: [Operateur; 4] = [
        Operateur::Plus,
        Operateur::Moins,
        Operateur::Fois,
        Operateur::Divise,
    ];

    /// Symbole affiché dans le tampon.
    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '×',
            Operateur::Divise => '÷',
        }
    }

    /// Symbole affiché ou alias clavier ASCII (* /).
    pub fn depuis_symbole(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '×' | '*' => Some(Operateur::Fois),
            '÷' | '/' => Some(Operateur::Divise),
            _ => None,
        }
    }
}

/// Vrai pour les caractères d’opérateur binaire du tampon.
pub fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '×' | '÷')
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parenthese {
    Ouvrante,
    Fermante,
}

impl Parenthese {
    pub fn symbole(self) -> char {
        match self {
            Parenthese::Ouvrante => '(',
            Parenthese::Fermante => ')',
        }
    }
}

/// Touche logique : même jeu d’opérations pour boutons et clavier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// chiffre 0..=9 (hors borne : ignoré)
    Chiffre(u8),
    Operateur(Operateur),
    Parenthese(Parenthese),
    Decimale,
    Signe,
    Pourcent,
    Retour,
    Effacer,
    Evaluer,
}

/// Issue d’une opération (taxonomie d’erreurs : rien n’est fatal).
#[derive(Clone, Debug, PartialEq)]
pub enum Issue {
    /// Le tampon a changé.
    Edition,
    /// Touche sans effet structurel (ex: second '.') : ignorée en silence.
    Ignoree,
    /// Évaluation réussie.
    Evaluee(Evaluation),
    /// Évaluation échouée : le tampon vaut "Error".
    Echec(ErreurEval),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tampon {
    texte: String,
    resultat_affiche: bool,
}

impl Default for Tampon {
    fn default() -> Self {
        Self {
            texte: ZERO.to_string(),
            resultat_affiche: false,
        }
    }
}

impl Tampon {
    /// Tampon arbitraire (tests, reprise d’un texte).
    pub fn avec(texte: impl Into<String>, resultat_affiche: bool) -> Self {
        Self {
            texte: texte.into(),
            resultat_affiche,
        }
    }

    fn edite(texte: impl Into<String>) -> Self {
        Self::avec(texte, false)
    }

    pub fn texte(&self) -> &str {
        &self.texte
    }

    pub fn resultat_affiche(&self) -> bool {
        self.resultat_affiche
    }

    pub fn est_erreur(&self) -> bool {
        self.texte == ERREUR
    }

    /// Départ à neuf : le prochain chiffre/parenthèse remplace le texte.
    fn depart_a_neuf(&self) -> bool {
        self.resultat_affiche || self.texte == ZERO || self.est_erreur()
    }

    /// Applique une opération : rend le tampon suivant + l’issue.
    pub fn appliquer(&self, op: Operation, chiffres: usize) -> (Tampon, Issue) {
        let suivant = match op {
            Operation::Chiffre(d) => char::from_digit(u32::from(d), 10).map(|c| self.inserer(c)),
            Operation::Operateur(o) => self.operateur(o),
            Operation::Parenthese(p) => Some(self.inserer(p.symbole())),
            Operation::Decimale => self.decimale(),
            Operation::Signe => self.signe(),
            Operation::Pourcent => self.pourcent(),
            Operation::Retour => Some(self.retour()),
            Operation::Effacer => Some(Tampon::default()),
            Operation::Evaluer => return self.evaluer(chiffres),
        };

        match suivant {
            Some(t) => (t, Issue::Edition),
            None => (self.clone(), Issue::Ignoree),
        }
    }

    /* ------------------------ Règles d’édition ------------------------ */

    /// Chiffre ou parenthèse : départ à neuf, sinon ajout.
    fn inserer(&self, c: char) -> Tampon {
        if self.depart_a_neuf() {
            return Tampon::edite(c.to_string());
        }
        let mut texte = self.texte.clone();
        texte.push(c);
        Tampon::edite(texte)
    }

    /// Opérateur : remplace un opérateur final, sinon s’ajoute (chaînage après résultat).
    fn operateur(&self, op: Operateur) -> Option<Tampon> {
        if self.est_erreur() {
            return None;
        }
        let mut texte = self.texte.clone();
        if texte.chars().last().is_some_and(est_operateur) {
            texte.pop();
        }
        texte.push(op.symbole());
        Some(Tampon::edite(texte))
    }

    /// '.' : refusé si le nombre en cours en a déjà un.
    fn decimale(&self) -> Option<Tampon> {
        if self.resultat_affiche || self.est_erreur() {
            return Some(Tampon::edite("0."));
        }
        let segment = self
            .texte
            .rsplit(|c: char| est_operateur(c) || c == '(' || c == ')')
            .next()
            .unwrap_or("");
        if segment.contains('.') {
            return None;
        }
        let mut texte = self.texte.clone();
        texte.push('.');
        Some(Tampon::edite(texte))
    }

    /// +/- sur le nombre final : "8" <=> "(-8)", "-8" => "8".
    fn signe(&self) -> Option<Tampon> {
        if self.resultat_affiche || self.est_erreur() {
            return None;
        }
        let n = nombre_final(&self.texte)?;
        let prefixe = &self.texte[..n.debut];

        let texte = if n.est_negatif() {
            format!("{prefixe}{}", n.texte.trim_start_matches('-'))
        } else {
            format!("{prefixe}(-{})", n.texte)
        };
        Some(Tampon::edite(texte))
    }

    /// % sur le nombre final : remplacé par sa valeur / 100, en décimal simple.
    fn pourcent(&self) -> Option<Tampon> {
        if self.resultat_affiche || self.est_erreur() {
            return None;
        }
        let n = nombre_final(&self.texte)?;
        let prefixe = &self.texte[..n.debut];
        let centieme = pourcent(n.texte)?;

        let texte = match n.forme {
            Forme::Enveloppe => format!("{prefixe}(-{centieme})"),
            Forme::Nu => format!("{prefixe}{centieme}"),
        };
        Some(Tampon::edite(texte))
    }

    /// ⌫ : efface tout après un résultat ou une erreur, sinon retire un caractère.
    fn retour(&self) -> Tampon {
        if self.resultat_affiche || self.est_erreur() {
            return Tampon::default();
        }
        let mut texte = self.texte.clone();
        texte.pop();
        if texte.is_empty() {
            return Tampon::default();
        }
        Tampon::edite(texte)
    }

    /// = : sans effet sur "Error", sur un résultat déjà affiché ou sur "0".
    fn evaluer(&self, chiffres: usize) -> (Tampon, Issue) {
        if self.est_erreur() || self.resultat_affiche || self.texte.is_empty() || self.texte == ZERO {
            return (self.clone(), Issue::Ignoree);
        }

        match eval_expression(&self.texte, chiffres) {
            Ok(e) => (Tampon::avec(e.rendu.clone(), true), Issue::Evaluee(e)),
            Err(err) => (Tampon::avec(ERREUR, true), Issue::Echec(err)),
        }
    }
}
