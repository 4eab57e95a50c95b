// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN en f64 (pile de valeurs, aucune évaluation dynamique)
//
// Règles:
// - × ÷ lient plus fort que + - ; associativité à gauche
// - Moins unaire: accepté SEULEMENT en début d’expression ou juste après '('
//   (forme "(-x)" injectée par +/-, ou résultat négatif réutilisé : "-5+3").
//   Partout ailleurs, un opérateur binaire doit avoir ses deux opérandes.

use super::erreur::ErreurEval;
use super::jetons::Tok;

/// Élément de sortie RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Plus,
    Moins,
    Fois,
    Divise,
    /// moins unaire
    Neg,
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    Op(Op),
    LPar,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Op {
    Plus,
    Moins,
    Fois,
    Divise,
    Neg,
}

impl Op {
    fn precedence(self) -> i32 {
        match self {
            Op::Plus | Op::Moins => 1,
            Op::Fois | Op::Divise => 2,
            Op::Neg => 3,
        }
    }

    fn vers_rpn(self) -> Rpn {
        match self {
            Op::Plus => Rpn::Plus,
            Op::Moins => Rpn::Moins,
            Op::Fois => Rpn::Fois,
            Op::Divise => Rpn::Divise,
            Op::Neg => Rpn::Neg,
        }
    }
}

fn op_binaire(t: &Tok) -> Option<Op> {
    match t {
        Tok::Plus => Some(Op::Plus),
        Tok::Moins => Some(Op::Moins),
        Tok::Fois => Some(Op::Fois),
        Tok::Divise => Some(Op::Divise),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Plus, Num(3), Fois, Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Fois, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurEval> {
    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    // true tant qu’on attend une valeur (nombre, '(' ou moins unaire)
    let mut attend_valeur = true;
    // true au début et juste après '(' : seuls endroits où le moins unaire est permis
    let mut unaire_permis = true;

    for tok in tokens {
        match tok {
            Tok::Num(v) => {
                if !attend_valeur {
                    return Err(ErreurEval::OperateurManquant);
                }
                out.push(Rpn::Num(*v));
                attend_valeur = false;
                unaire_permis = false;
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(ErreurEval::OperateurManquant);
                }
                ops.push(Pile::LPar);
                unaire_permis = true;
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(ErreurEval::OperandeManquant);
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Pile::LPar) => break,
                        Some(Pile::Op(op)) => out.push(op.vers_rpn()),
                        None => return Err(ErreurEval::ParentheseNonOuverte),
                    }
                }
            }

            Tok::Moins if attend_valeur => {
                if !unaire_permis {
                    return Err(ErreurEval::OperandeManquant);
                }
                // préfixe : rien à dépiler
                ops.push(Pile::Op(Op::Neg));
                unaire_permis = false;
            }

            Tok::Plus | Tok::Moins | Tok::Fois | Tok::Divise => {
                if attend_valeur {
                    return Err(ErreurEval::OperandeManquant);
                }
                let Some(op) = op_binaire(tok) else {
                    return Err(ErreurEval::OperandeManquant);
                };

                while let Some(Pile::Op(top)) = ops.last().copied() {
                    if top.precedence() >= op.precedence() {
                        ops.pop();
                        out.push(top.vers_rpn());
                    } else {
                        break;
                    }
                }

                ops.push(Pile::Op(op));
                attend_valeur = true;
                unaire_permis = false;
            }
        }
    }

    if attend_valeur {
        return Err(if tokens.is_empty() {
            ErreurEval::ExpressionVide
        } else {
            ErreurEval::OperandeManquant
        });
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::LPar => return Err(ErreurEval::ParentheseNonFermee),
            Pile::Op(op) => out.push(op.vers_rpn()),
        }
    }

    Ok(out)
}

/// Évalue une RPN.
pub fn eval_rpn(rpn: &[Rpn]) -> Result<f64, ErreurEval> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for el in rpn {
        match el {
            Rpn::Num(v) => st.push(*v),

            Rpn::Neg => {
                let x = st.pop().ok_or(ErreurEval::OperandeManquant)?;
                st.push(-x);
            }

            Rpn::Plus | Rpn::Moins | Rpn::Fois | Rpn::Divise => {
                let b = st.pop().ok_or(ErreurEval::OperandeManquant)?;
                let a = st.pop().ok_or(ErreurEval::OperandeManquant)?;

                let v = match el {
                    Rpn::Plus => a + b,
                    Rpn::Moins => a - b,
                    Rpn::Fois => a * b,
                    _ => {
                        if b == 0.0 {
                            return Err(ErreurEval::DivisionParZero);
                        }
                        a / b
                    }
                };
                st.push(v);
            }
        }
    }

    match st.as_slice() {
        [v] if v.is_finite() => Ok(*v),
        [_] => Err(ErreurEval::ResultatNonFini),
        [] => Err(ErreurEval::ExpressionVide),
        _ => Err(ErreurEval::OperateurManquant),
    }
}

/// Format utilitaire (démarche) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|el| match el {
            Rpn::Num(v) => super::format::rendre(*v),
            Rpn::Plus => "+".to_string(),
            Rpn::Moins => "-".to_string(),
            Rpn::Fois => "×".to_string(),
            Rpn::Divise => "÷".to_string(),
            Rpn::Neg => "neg".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
