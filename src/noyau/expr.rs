// src/noyau/expr.rs
//
// AST symbolique.
// - Rat : rationnel exact (littéraux décimaux, coefficients de dérivées)
// - Pi, E : constantes
// - Var : grandeur d’entrée (ex: x1)
// - Appel : fonction élémentaire à un argument
//
// IMPORTANT:
// - simplify() ne doit jamais “inventer” une valeur pour Var.
// - Pas de flottants ici : la valeur numérique est calculée dans eval.rs.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use std::fmt;

/// Fonctions élémentaires reconnues par la grammaire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Abs,
    Ln,
    Log10,
    Exp,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
}

impl Fonction {
    /// Nom → fonction unaire. `log` à deux arguments est traité par rpn.rs.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;
        let f = match nom {
            "sqrt" => Sqrt,
            "abs" | "Abs" => Abs,
            "log" | "ln" => Ln,
            "log10" => Log10,
            "exp" => Exp,
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" | "arcsin" => Asin,
            "acos" | "arccos" => Acos,
            "atan" | "arctan" => Atan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sqrt => "sqrt",
            Abs => "abs",
            Ln => "log",
            Log10 => "log10",
            Exp => "exp",
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
        }
    }

    /// Application numérique.
    pub fn appliquer(self, x: f64) -> f64 {
        use Fonction::*;
        match self {
            Sqrt => x.sqrt(),
            Abs => x.abs(),
            Ln => x.ln(),
            Log10 => x.log10(),
            Exp => x.exp(),
            Sin => x.sin(),
            Cos => x.cos(),
            Tan => x.tan(),
            Asin => x.asin(),
            Acos => x.acos(),
            Atan => x.atan(),
            Sinh => x.sinh(),
            Cosh => x.cosh(),
            Tanh => x.tanh(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Rat(BigRational),
    Pi,
    E,

    Var(String),

    Appel(Fonction, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>), // a^b (exposant quelconque)

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn entier(n: i64) -> Expr {
        Expr::Rat(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn zero() -> Expr {
        Expr::Rat(BigRational::zero())
    }

    pub fn est_zero(&self) -> bool {
        matches!(self, Expr::Rat(r) if r.is_zero())
    }

    pub fn est_un(&self) -> bool {
        matches!(self, Expr::Rat(r) if r.is_one())
    }

    /// Simplification locale (SAFE), sans heuristiques.
    /// Objectif: replier les rationnels et retirer les neutres pour que les dérivées
    /// restent petites.
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            Rat(_) | Pi | E | Var(_) => self,

            Add(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x + y),
                    (Rat(x), _) if x.is_zero() => b,
                    (_, Rat(y)) if y.is_zero() => a,
                    _ => Add(Box::new(a), Box::new(b)),
                }
            }

            Sub(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                // x - x => 0
                if a == b {
                    return Rat(BigRational::zero());
                }

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x - y),
                    (_, Rat(y)) if y.is_zero() => a,
                    // 0 - (0 - x) => x
                    (Rat(x), Sub(z, inner)) if x.is_zero() && z.est_zero() => (**inner).clone(),
                    _ => Sub(Box::new(a), Box::new(b)),
                }
            }

            Mul(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x * y),
                    (Rat(x), _) if x.is_zero() => Rat(BigRational::zero()),
                    (_, Rat(y)) if y.is_zero() => Rat(BigRational::zero()),
                    (Rat(x), _) if x.is_one() => b,
                    (_, Rat(y)) if y.is_one() => a,
                    // k * (m * x) => (k*m) * x
                    (Rat(k), Mul(m, x)) => match m.as_ref() {
                        Rat(m) => Mul(Box::new(Rat(k * m)), x.clone()).simplify(),
                        _ => Mul(Box::new(a), Box::new(b)),
                    },
                    // x * k => k * x (coefficient en tête)
                    (_, Rat(_)) => Mul(Box::new(b), Box::new(a)),
                    _ => Mul(Box::new(a), Box::new(b)),
                }
            }

            Div(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                // division par zéro : on garde symbolique (l’évaluation signalera l’erreur)
                if b.est_zero() {
                    return Div(Box::new(a), Box::new(b));
                }

                if a == b {
                    if let Rat(_) = a {
                        return Rat(BigRational::one());
                    }
                }

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x / y),
                    (Rat(x), _) if x.is_zero() => Rat(BigRational::zero()),
                    (_, Rat(y)) if y.is_one() => a,
                    _ => Div(Box::new(a), Box::new(b)),
                }
            }

            Pow(base, exp) => {
                let base = base.simplify();
                let exp = exp.simplify();

                if exp.est_zero() {
                    return Rat(BigRational::one());
                }
                if exp.est_un() {
                    return base;
                }
                if base.est_un() {
                    return Rat(BigRational::one());
                }

                // rationnel ^ entier : exact
                if let (Rat(r), Rat(n)) = (&base, &exp) {
                    if n.denom().is_one() && !(r.is_zero() && n.is_negative()) {
                        if let Some(k) = petit_entier(n.numer()) {
                            if puissance_raisonnable(r, k) {
                                return Rat(rational_pow_int(r.clone(), k));
                            }
                        }
                    }
                }

                // (a^m)^n => a^(m*n) si m, n entiers
                if let (Pow(a, m), Rat(n)) = (&base, &exp) {
                    if let Rat(m) = m.as_ref() {
                        if m.denom().is_one() && n.denom().is_one() {
                            return Pow(a.clone(), Box::new(Rat(m * n))).simplify();
                        }
                    }
                }

                Pow(Box::new(base), Box::new(exp))
            }

            Appel(f, x) => {
                let x = x.simplify();
                if let Some(v) = appel_exact(f, &x) {
                    return v;
                }
                Appel(f, Box::new(x))
            }
        }
    }

    /// Vrai si la variable `nom` apparaît (libre) dans l’expression.
    /// Itératif + garde-fous : si l’arbre est trop gros, on retourne true (SAFE => on dérive).
    pub fn contient_var(&self, nom: &str) -> bool {
        use Expr::*;

        const MAX_PILE: usize = 8192;
        const MAX_NOEUDS: usize = 200_000;

        let mut pile: Vec<&Expr> = Vec::with_capacity(64);
        pile.push(self);

        let mut visites: usize = 0;

        while let Some(e) = pile.pop() {
            visites += 1;
            if visites > MAX_NOEUDS || pile.len() > MAX_PILE {
                return true;
            }

            match e {
                Var(v) if v == nom => return true,
                Var(_) | Rat(_) | Pi | E => {}

                Appel(_, x) => pile.push(x.as_ref()),

                Pow(a, b) | Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) => {
                    pile.push(a.as_ref());
                    pile.push(b.as_ref());
                }
            }
        }

        false
    }

    /// Noms des variables, dans l’ordre de première apparition (gauche → droite).
    pub fn variables(&self) -> Vec<String> {
        fn collecte(e: &Expr, out: &mut Vec<String>) {
            use Expr::*;
            match e {
                Var(v) => {
                    if !out.iter().any(|x| x == v) {
                        out.push(v.clone());
                    }
                }
                Rat(_) | Pi | E => {}
                Appel(_, x) => collecte(x, out),
                Pow(a, b) | Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) => {
                    collecte(a, out);
                    collecte(b, out);
                }
            }
        }

        let mut out = Vec::new();
        collecte(self, &mut out);
        out
    }
}

/// Valeurs exactes triviales d’une fonction (ln(1)=0, sqrt(4)=2, exp(0)=1, ...).
/// On ne touche jamais à un argument non rationnel.
fn appel_exact(f: Fonction, x: &Expr) -> Option<Expr> {
    use Fonction::*;

    if let Expr::Rat(r) = x {
        match f {
            Sqrt => return rational_sqrt_exact(r).map(Expr::Rat),
            Abs => return Some(Expr::Rat(r.abs())),
            Ln if r.is_one() => return Some(Expr::zero()),
            Log10 if r.is_one() => return Some(Expr::zero()),
            Exp | Cosh if r.is_zero() => return Some(Expr::entier(1)),
            Sin | Tan | Asin | Atan | Sinh | Tanh if r.is_zero() => return Some(Expr::zero()),
            Cos if r.is_zero() => return Some(Expr::entier(1)),
            _ => {}
        }
    }

    // ln(E) = 1
    if f == Ln && *x == Expr::E {
        return Some(Expr::entier(1));
    }
    None
}

/* ------------------------ Affichage (journal / dérivées lisibles) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Rat(r) => {
                let n = r.numer();
                let d = r.denom();
                if d.is_one() {
                    write!(f, "{n}")
                } else {
                    write!(f, "({n}/{d})")
                }
            }
            Pi => write!(f, "pi"),
            E => write!(f, "E"),
            Var(s) => write!(f, "{s}"),
            Appel(func, x) => write!(f, "{}({x})", func.nom()),
            Pow(a, b) => write!(f, "({a})^({b})"),
            Add(a, b) => write!(f, "({a} + {b})"),
            Sub(a, b) if a.est_zero() => write!(f, "(-{b})"),
            Sub(a, b) => write!(f, "({a} - {b})"),
            Mul(a, b) => write!(f, "{a}*{b}"),
            Div(a, b) => match b.as_ref() {
                Mul(..) | Div(..) => write!(f, "{a}/({b})"),
                _ => write!(f, "{a}/{b}"),
            },
        }
    }
}

/* ------------------------ Outils rationnels (utilisés par simplify) ------------------------ */

fn petit_entier(x: &BigInt) -> Option<i64> {
    let n: i64 = x.to_string().parse().ok()?;
    // garde-fou : pas d’exposant gigantesque sur un rationnel
    if n.abs() <= 1024 {
        Some(n)
    } else {
        None
    }
}

/// Taille maximale (en bits) d’un rationnel obtenu par puissance exacte.
/// Au-delà, la puissance reste symbolique.
const BITS_MAX_PUISSANCE: u64 = 16_384;

/// Estimation de la taille de r^k : bits(r) · |k|.
fn puissance_raisonnable(r: &BigRational, k: i64) -> bool {
    let bits = r.numer().bits().max(r.denom().bits());
    bits.saturating_mul(k.unsigned_abs()) <= BITS_MAX_PUISSANCE
}

fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base, -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

fn rational_sqrt_exact(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let sn = r.numer().sqrt();
    let sd = r.denom().sqrt();
    if &sn * &sn == *r.numer() && &sd * &sd == *r.denom() {
        Some(BigRational::new(sn, sd))
    } else {
        None
    }
}
