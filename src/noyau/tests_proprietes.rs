//! Tests de propriétés : suites arbitraires de touches sur le moteur.
//!
//! Vérifie :
//! 1. Jamais deux opérateurs binaires adjacents dans le texte
//! 2. "=" deux fois de suite : le second ne change rien
//! 3. Réentrée : un résultat ressaisi puis évalué redonne la même valeur
//! 4. Drapeau : "résultat affiché" faux après toute édition
//! 5. "Error" n’apparaît que comme texte entier, avec résultat affiché

use proptest::prelude::*;

use super::moteur::Moteur;
use super::tampon::{est_operateur, Issue, Operateur, Operation, Parenthese, Tampon, ERREUR};

// ── Stratégies ─────────────────────────────────────────────────────────

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (0u8..=9).prop_map(Operation::Chiffre),
        3 => prop::sample::select(Operateur::TOUS.to_vec()).prop_map(Operation::Operateur),
        1 => Just(Operation::Parenthese(Parenthese::Ouvrante)),
        1 => Just(Operation::Parenthese(Parenthese::Fermante)),
        1 => Just(Operation::Decimale),
        1 => Just(Operation::Signe),
        1 => Just(Operation::Pourcent),
        1 => Just(Operation::Retour),
        1 => Just(Operation::Effacer),
        2 => Just(Operation::Evaluer),
    ]
}

fn arb_operations() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(arb_operation(), 0..60)
}

fn operateurs_adjacents(s: &str) -> bool {
    s.chars()
        .zip(s.chars().skip(1))
        .any(|(a, b)| est_operateur(a) && est_operateur(b))
}

fn saisir(m: &mut Moteur, texte: &str) {
    for c in texte.chars() {
        let op = match c {
            '0'..='9' => Operation::Chiffre(c as u8 - b'0'),
            '.' => Operation::Decimale,
            _ => match Operateur::depuis_symbole(c) {
                Some(o) => Operation::Operateur(o),
                None => continue,
            },
        };
        m.dispatch(op);
    }
}

proptest! {
    #[test]
    fn jamais_deux_operateurs_adjacents(ops in arb_operations()) {
        let mut m = Moteur::default();
        for op in ops {
            m.dispatch(op);
            prop_assert!(
                !operateurs_adjacents(m.texte_courant()),
                "texte={:?} après {:?}", m.texte_courant(), op
            );
        }
    }

    #[test]
    fn evaluer_est_idempotent(ops in arb_operations()) {
        let mut m = Moteur::default();
        for op in ops {
            m.dispatch(op);
        }
        m.dispatch(Operation::Evaluer);
        let apres_un: Tampon = m.tampon().clone();
        prop_assert_eq!(m.dispatch(Operation::Evaluer), Issue::Ignoree);
        prop_assert_eq!(m.tampon(), &apres_un);
    }

    #[test]
    fn drapeau_coherent(ops in arb_operations()) {
        let mut m = Moteur::default();
        for op in ops {
            let issue = m.dispatch(op);
            match issue {
                Issue::Edition => {
                    prop_assert!(!m.tampon().resultat_affiche());
                }
                Issue::Evaluee(_) | Issue::Echec(_) => {
                    prop_assert!(m.tampon().resultat_affiche());
                }
                Issue::Ignoree => {}
            }
            let texte = m.texte_courant();
            if texte.contains(ERREUR) {
                prop_assert_eq!(texte, ERREUR);
                prop_assert!(m.tampon().resultat_affiche());
            }
        }
    }

    #[test]
    fn reentree_du_resultat(ops in arb_operations()) {
        let mut m = Moteur::default();
        for op in ops {
            m.dispatch(op);
        }
        if let Issue::Evaluee(e) = m.dispatch(Operation::Evaluer) {
            let mut m2 = Moteur::default();
            saisir(&mut m2, &e.rendu);
            match m2.dispatch(Operation::Evaluer) {
                Issue::Evaluee(e2) => {
                    prop_assert_eq!(e2.valeur, e.valeur);
                }
                // "0" ressaisi : rien à évaluer, la valeur est déjà 0
                Issue::Ignoree => {
                    prop_assert_eq!(e.valeur, 0.0);
                }
                autre => {
                    prop_assert!(false, "réentrée de {:?} => {:?}", e.rendu, autre);
                }
            }
        }
    }
}

#[test]
fn reentree_negative() {
    let mut m = Moteur::default();
    saisir(&mut m, "3-10");
    let Issue::Evaluee(e) = m.dispatch(Operation::Evaluer) else {
        panic!("3-10 devrait s’évaluer");
    };
    assert_eq!(e.rendu, "-7");

    let mut m2 = Moteur::default();
    saisir(&mut m2, &e.rendu);
    assert_eq!(m2.texte_courant(), "0-7");
}
