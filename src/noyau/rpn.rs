// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name) suivi de '(' et name connu (sin, log, ...) => appel de fonction
// - Ident(name) sinon => variable (Expr::Var)
// - log(x, b) : seule fonction à deux arguments => ln(x)/ln(b)
// - Moins unaire : on injecte 0 ("-x" => "0 x -") avec une précédence entre * et ^,
//   pour que "2*-x" donne 2*(0-x) et "-x^2" donne 0-(x^2).

use num_rational::BigRational;
use num_traits::Zero;

use super::expr::{Expr, Fonction};
use super::jetons::Tok;

/// Élément de sortie RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(BigRational),
    Pi,
    E,
    Var(String),
    Op(Tok),
    Appel(String, usize), // (nom, nombre d’arguments)
}

/// Pile d’opérateurs (interne).
#[derive(Clone, Debug)]
enum Pile {
    Op(Tok),
    Neg,
    LPar,
    Fonction(String, usize),
}

const PREC_NEG: i32 = 3;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Identificateurs reconnus comme fonctions.
fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("log"), LPar, Ident("x"), Virgule, Num(10), RPar]
///   rpn:    [Var("x"), Num(10), Appel("log", 2)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, String> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    let mut iter = tokens.iter().cloned().peekable();
    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(r) => {
                out.push(Rpn::Num(r));
                prev_was_value = true;
            }
            Tok::Pi => {
                out.push(Rpn::Pi);
                prev_was_value = true;
            }
            Tok::E => {
                out.push(Rpn::E);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                let appel = matches!(iter.peek(), Some(Tok::LPar));
                if is_fonction_ident(&name) {
                    if !appel {
                        return Err(format!("fonction sans parenthèses: {name}"));
                    }
                    // fonction : on la garde sur la pile (elle sortira après ses arguments)
                    ops.push(Pile::Fonction(name, 1));
                    prev_was_value = false;
                } else if appel {
                    return Err(format!("fonction inconnue: {name}"));
                } else {
                    out.push(Rpn::Var(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(Pile::LPar);
                prev_was_value = false;
            }

            Tok::Virgule => {
                if !prev_was_value {
                    return Err("argument manquant avant ','".into());
                }
                depile_jusqu_a_parenthese(&mut ops, &mut out)?;
                // la parenthèse doit appartenir à un appel de fonction
                match ops.len().checked_sub(2).and_then(|i| ops.get_mut(i)) {
                    Some(Pile::Fonction(_, n)) => *n += 1,
                    _ => return Err("virgule hors d’un appel de fonction".into()),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err("parenthèse vide ou argument manquant".into());
                }
                depile_jusqu_a_parenthese(&mut ops, &mut out)?;
                ops.pop(); // '('

                // si une fonction est au sommet, on la sort aussi
                if let Some(Pile::Fonction(..)) = ops.last() {
                    if let Some(Pile::Fonction(name, n)) = ops.pop() {
                        out.push(Rpn::Appel(name, n));
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus if !prev_was_value => {
                // plus unaire : sans effet
            }

            Tok::Minus if !prev_was_value => {
                // moins unaire : injecte 0, opérateur préfixe (rien à dépiler)
                out.push(Rpn::Num(BigRational::zero()));
                ops.push(Pile::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let p_tok = precedence(&tok);

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    let p_top = match top {
                        Pile::Op(t) => precedence(t),
                        Pile::Neg => PREC_NEG,
                        Pile::LPar | Pile::Fonction(..) => break,
                    };

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        sortie_op(op, &mut out);
                    }
                }

                ops.push(Pile::Op(tok));
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Pile::LPar | Pile::Fonction(..) => return Err("parenthèses non fermées".into()),
            _ => sortie_op(op, &mut out),
        }
    }

    Ok(out)
}

fn sortie_op(op: Pile, out: &mut Vec<Rpn>) {
    match op {
        Pile::Op(t) => out.push(Rpn::Op(t)),
        Pile::Neg => out.push(Rpn::Op(Tok::Minus)),
        Pile::Fonction(name, n) => out.push(Rpn::Appel(name, n)),
        Pile::LPar => {}
    }
}

/// Dépile les opérateurs jusqu’à la '(' (laissée sur la pile).
fn depile_jusqu_a_parenthese(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) -> Result<(), String> {
    loop {
        match ops.last() {
            None => return Err("parenthèse fermante sans ouvrante".into()),
            Some(Pile::LPar) => return Ok(()),
            Some(_) => {
                if let Some(op) = ops.pop() {
                    sortie_op(op, out);
                }
            }
        }
    }
}

/// Profondeur maximale de l’arbre construit (simplify, dérivée et évaluation
/// descendent l’arbre récursivement).
pub const PROFONDEUR_MAX: usize = 256;

/// Construit une Expr à partir d’une RPN.
///
/// Chaque élément de la pile garde la profondeur de son sous-arbre : au-delà de
/// `PROFONDEUR_MAX`, l’expression est refusée.
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, String> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for item in rpn.iter().cloned() {
        match item {
            Rpn::Num(r) => empile(&mut st, Expr::Rat(r), 1)?,
            Rpn::Pi => empile(&mut st, Expr::Pi, 1)?,
            Rpn::E => empile(&mut st, Expr::E, 1)?,
            Rpn::Var(name) => empile(&mut st, Expr::Var(name), 1)?,

            Rpn::Op(tok) => {
                let (b, pb) = st.pop().ok_or("opérande manquant")?;
                let (a, pa) = st.pop().ok_or("opérande manquant")?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    Tok::Caret => Expr::Pow(Box::new(a), Box::new(b)),
                    other => return Err(format!("opérateur inattendu en RPN: {other:?}")),
                };

                empile(&mut st, e, pa.max(pb) + 1)?;
            }

            Rpn::Appel(name, n) => {
                if name == "log" && n == 2 {
                    // log(x, b) = ln(x) / ln(b)
                    let (base, pb) = st.pop().ok_or("log: base manquante")?;
                    let (x, px) = st.pop().ok_or("log: argument manquant")?;
                    let e = Expr::Div(
                        Box::new(Expr::Appel(Fonction::Ln, Box::new(x))),
                        Box::new(Expr::Appel(Fonction::Ln, Box::new(base))),
                    );
                    empile(&mut st, e, px.max(pb) + 2)?;
                    continue;
                }
                if n != 1 {
                    return Err(format!("{name}: {n} arguments au lieu de 1"));
                }
                let f = Fonction::depuis_nom(&name).ok_or_else(|| format!("fonction inconnue: {name}"))?;
                let (x, px) = st.pop().ok_or("fonction sans argument")?;
                empile(&mut st, Expr::Appel(f, Box::new(x)), px + 1)?;
            }
        }
    }

    if st.len() != 1 {
        return Err("expression invalide".into());
    }
    st.pop()
        .map(|(e, _)| e)
        .ok_or_else(|| "expression invalide".to_string())
}

fn empile(st: &mut Vec<(Expr, usize)>, e: Expr, prof: usize) -> Result<(), String> {
    if prof > PROFONDEUR_MAX {
        return Err(format!("expression trop imbriquée (profondeur > {PROFONDEUR_MAX})"));
    }
    st.push((e, prof));
    Ok(())
}

/// Format utilitaire (journal de debug) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Num(x) => format!("{}", Expr::Rat(x.clone())),
            Rpn::Pi => "π".to_string(),
            Rpn::E => "E".to_string(),
            Rpn::Var(v) => v.clone(),
            Rpn::Op(t) => super::jetons::format_tokens(std::slice::from_ref(t)),
            Rpn::Appel(name, n) => format!("{name}/{n}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
