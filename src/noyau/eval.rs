//! Noyau : analyse et évaluation
//!
//! tokenize -> RPN -> Expr -> simplify -> évaluation numérique (f64)
//!
//! L’analyse est exacte (rationnels) ; seule l’évaluation finale passe en flottant.

use std::collections::BTreeMap;

use num_traits::ToPrimitive;

use super::erreur::{ErreurIncertitude, Resultat};
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{format_rpn, from_rpn, to_rpn};

/// Analyse une chaîne en expression symbolique simplifiée.
///
/// Toute erreur de syntaxe devient `ExpressionInvalide` avec le diagnostic du parseur.
pub fn analyser(expr_str: &str) -> Resultat<Expr> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurIncertitude::ExpressionVide);
    }

    // 1) Jetons
    let jetons = tokenize(s).map_err(ErreurIncertitude::ExpressionInvalide)?;
    log::debug!("jetons: {}", format_tokens(&jetons));

    // 2) RPN
    let rpn = to_rpn(&jetons).map_err(ErreurIncertitude::ExpressionInvalide)?;
    log::debug!("rpn: {}", format_rpn(&rpn));

    // 3) AST + simplification de base
    let expr = from_rpn(&rpn)
        .map_err(ErreurIncertitude::ExpressionInvalide)?
        .simplify();
    log::debug!("expr: {expr}");

    Ok(expr)
}

/// Évalue `expr` en substituant chaque variable par sa valeur.
///
/// Échoue si une variable n’a pas de valeur, ou si le résultat n’est pas un réel fini
/// (division par zéro, racine d’un négatif, ...).
pub fn evaluer(expr: &Expr, valeurs: &BTreeMap<String, f64>) -> Resultat<f64> {
    let y = eval_f64(expr, valeurs)?;
    if !y.is_finite() {
        return Err(ErreurIncertitude::EvaluationImpossible(format!(
            "{expr} ne donne pas un réel fini ({y})"
        )));
    }
    Ok(y)
}

fn eval_f64(expr: &Expr, valeurs: &BTreeMap<String, f64>) -> Resultat<f64> {
    use Expr::*;

    let v = match expr {
        Rat(r) => r.to_f64().unwrap_or(f64::NAN),
        Pi => std::f64::consts::PI,
        E => std::f64::consts::E,
        Var(nom) => *valeurs
            .get(nom)
            .ok_or_else(|| ErreurIncertitude::VariableSansValeur(nom.clone()))?,

        Add(a, b) => eval_f64(a, valeurs)? + eval_f64(b, valeurs)?,
        Sub(a, b) => eval_f64(a, valeurs)? - eval_f64(b, valeurs)?,
        Mul(a, b) => eval_f64(a, valeurs)? * eval_f64(b, valeurs)?,

        Div(a, b) => {
            let num = eval_f64(a, valeurs)?;
            let den = eval_f64(b, valeurs)?;
            if den == 0.0 {
                return Err(ErreurIncertitude::EvaluationImpossible(format!(
                    "division par zéro dans {expr}"
                )));
            }
            num / den
        }

        Pow(a, b) => {
            let base = eval_f64(a, valeurs)?;
            match b.as_ref() {
                // exposant entier exact : powi (base négative autorisée)
                Rat(r) if r.is_integer() => match r.to_i32() {
                    Some(n) => base.powi(n),
                    None => base.powf(r.to_f64().unwrap_or(f64::NAN)),
                },
                _ => base.powf(eval_f64(b, valeurs)?),
            }
        }

        Appel(f, x) => f.appliquer(eval_f64(x, valeurs)?),
    };

    Ok(v)
}
