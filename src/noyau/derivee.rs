// src/noyau/derivee.rs
//
// Dérivation symbolique exacte (pas de différences finies).
//
// Règles classiques : somme, produit, quotient, puissance (3 cas), chaîne.
// Les constructeurs locaux (somme, produit, ...) simplifient au fil de l’eau
// pour que l’arbre dérivé reste de la taille de l’arbre d’origine.

use super::expr::{Expr, Fonction};

/// ∂expr/∂nom, simplifiée.
///
/// Si `nom` n’apparaît pas dans `expr`, le résultat est l’expression nulle.
pub fn derivee_partielle(expr: &Expr, nom: &str) -> Expr {
    if !expr.contient_var(nom) {
        return Expr::zero();
    }
    deriver(expr, nom).simplify()
}

fn deriver(e: &Expr, v: &str) -> Expr {
    use Expr::*;

    // court-circuit : sous-arbre constant vis-à-vis de v
    if !e.contient_var(v) {
        return Expr::zero();
    }

    match e {
        Rat(_) | Pi | E => Expr::zero(),
        Var(nom) => {
            if nom == v {
                Expr::entier(1)
            } else {
                Expr::zero()
            }
        }

        Add(a, b) => somme(deriver(a, v), deriver(b, v)),
        Sub(a, b) => difference(deriver(a, v), deriver(b, v)),

        // (ab)' = a'b + ab'
        Mul(a, b) => somme(
            produit(deriver(a, v), (**b).clone()),
            produit((**a).clone(), deriver(b, v)),
        ),

        // (a/b)' = (a'b - ab') / b²
        Div(a, b) => {
            if !b.contient_var(v) {
                return quotient(deriver(a, v), (**b).clone());
            }
            quotient(
                difference(
                    produit(deriver(a, v), (**b).clone()),
                    produit((**a).clone(), deriver(b, v)),
                ),
                puissance((**b).clone(), Expr::entier(2)),
            )
        }

        Pow(a, b) => deriver_puissance(a, b, v),

        Appel(f, u) => produit(derivee_fonction(*f, u), deriver(u, v)),
    }
}

/// (a^b)'
fn deriver_puissance(a: &Expr, b: &Expr, v: &str) -> Expr {
    let a_var = a.contient_var(v);
    let b_var = b.contient_var(v);

    match (a_var, b_var) {
        // b * a^(b-1) * a'
        (true, false) => produit(
            produit(
                b.clone(),
                puissance(a.clone(), difference(b.clone(), Expr::entier(1))),
            ),
            deriver(a, v),
        ),
        // a^b * ln(a) * b'
        (false, true) => produit(
            produit(
                puissance(a.clone(), b.clone()),
                appel(Fonction::Ln, a.clone()),
            ),
            deriver(b, v),
        ),
        // a^b * (b' ln(a) + b a'/a)
        (true, true) => produit(
            puissance(a.clone(), b.clone()),
            somme(
                produit(deriver(b, v), appel(Fonction::Ln, a.clone())),
                quotient(produit(b.clone(), deriver(a, v)), a.clone()),
            ),
        ),
        (false, false) => Expr::zero(),
    }
}

/// f'(u) (sans le facteur u').
fn derivee_fonction(f: Fonction, u: &Expr) -> Expr {
    use Fonction::*;

    let u = u.clone();
    let un = || Expr::entier(1);
    let carre = |x: Expr| puissance(x, Expr::entier(2));

    match f {
        // 1 / (2√u)
        Sqrt => quotient(un(), produit(Expr::entier(2), appel(Sqrt, u))),
        // u / |u|
        Abs => quotient(u.clone(), appel(Abs, u)),
        Ln => quotient(un(), u),
        // 1 / (u ln 10)
        Log10 => quotient(un(), produit(u, appel(Ln, Expr::entier(10)))),
        Exp => appel(Exp, u),
        Sin => appel(Cos, u),
        Cos => difference(Expr::zero(), appel(Sin, u)),
        // 1 + tan²u
        Tan => somme(un(), carre(appel(Tan, u))),
        // 1 / √(1 - u²)
        Asin => quotient(un(), appel(Sqrt, difference(un(), carre(u)))),
        Acos => difference(
            Expr::zero(),
            quotient(un(), appel(Sqrt, difference(un(), carre(u)))),
        ),
        // 1 / (1 + u²)
        Atan => quotient(un(), somme(un(), carre(u))),
        Sinh => appel(Cosh, u),
        Cosh => appel(Sinh, u),
        // 1 - tanh²u
        Tanh => difference(un(), carre(appel(Tanh, u))),
    }
}

/* ------------------------ Constructeurs simplifiants ------------------------ */

fn somme(a: Expr, b: Expr) -> Expr {
    Expr::Add(Box::new(a), Box::new(b)).simplify()
}

fn difference(a: Expr, b: Expr) -> Expr {
    Expr::Sub(Box::new(a), Box::new(b)).simplify()
}

fn produit(a: Expr, b: Expr) -> Expr {
    Expr::Mul(Box::new(a), Box::new(b)).simplify()
}

fn quotient(a: Expr, b: Expr) -> Expr {
    Expr::Div(Box::new(a), Box::new(b)).simplify()
}

fn puissance(a: Expr, b: Expr) -> Expr {
    Expr::Pow(Box::new(a), Box::new(b)).simplify()
}

fn appel(f: Fonction, x: Expr) -> Expr {
    Expr::Appel(f, Box::new(x)).simplify()
}
