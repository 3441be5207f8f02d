//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * dérivée symbolique ≈ différence finie centrée (fonctions lisses)
//!   * l’arrondi reste à moins d’une demi-unité et ne garde pas plus de décimales
//!   * la valeur formatée a autant de décimales que l’incertitude formatée
//!   * une saisie quelconque ne fait jamais paniquer l’analyse

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::arrondi::{arrondir_decimal, DecimalExact};
use super::derivee::derivee_partielle;
use super::erreur::ErreurIncertitude;
use super::eval::{analyser, evaluer};
use super::format::{decimales_implicites, formater_resultat};
use super::propagation::propager;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    /// Réel uniforme dans [a, b).
    fn reel(&mut self, a: f64, b: f64) -> f64 {
        a + (b - a) * (self.next_u32() as f64 / 4294967296.0)
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée, lisses) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(5) {
        0 | 1 => "x1".to_string(),
        2 => "x2".to_string(),
        3 => format!("{}", rng.pick(3) + 1),
        _ => "pi".to_string(),
    }
}

/// Expressions définies et dérivables sur tout ℝ² (dénominateurs > 0, exp borné).
fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(9) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/(2+({})^2))", gen_expr(rng, depth - 1)),
        5 => format!("sin({a})"),
        6 => format!("cos({a})"),
        7 => format!("exp(sin({a}))"),
        _ => format!("atan({a})^2"),
    }
}

fn point(x1: f64, x2: f64) -> BTreeMap<String, f64> {
    [("x1".to_string(), x1), ("x2".to_string(), x2)].into()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_derivee_contre_difference_finie() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let h = 1e-5;

    for _ in 0..150 {
        budget(t0, max);

        let s = gen_expr(&mut rng, 2);
        let expr = analyser(&s).unwrap_or_else(|e| panic!("expr={s:?} err={e}"));
        let (x1, x2) = (rng.reel(-1.0, 1.0), rng.reel(-1.0, 1.0));

        let d = derivee_partielle(&expr, "x1");
        let symbolique = evaluer(&d, &point(x1, x2)).unwrap_or_else(|e| panic!("d({s:?}) err={e}"));

        let plus = evaluer(&expr, &point(x1 + h, x2)).unwrap();
        let moins = evaluer(&expr, &point(x1 - h, x2)).unwrap();
        let numerique = (plus - moins) / (2.0 * h);

        assert!(
            (symbolique - numerique).abs() <= 1e-5 * numerique.abs().max(1.0),
            "expr={s:?} en ({x1}, {x2}) : {symbolique} vs {numerique}"
        );
    }
}

#[test]
fn fuzz_safe_propagation_positive_et_deterministe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..60 {
        budget(t0, max);

        let s = gen_expr(&mut rng, 2);
        let v = point(rng.reel(-2.0, 2.0), rng.reel(-2.0, 2.0));
        let u = point(rng.reel(0.0, 0.1), rng.reel(0.0, 0.1));

        let r1 = propager(&s, &v, &u).unwrap_or_else(|e| panic!("expr={s:?} err={e}"));
        let r2 = propager(&s, &v, &u).unwrap();
        assert_eq!(r1, r2, "expr={s:?}");
        assert!(r1.incertitude >= 0.0 && r1.incertitude.is_finite(), "expr={s:?}");
    }
}

#[test]
fn fuzz_safe_arrondi_demi_unite() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..2000 {
        budget(t0, max);

        let x = rng.reel(-1000.0, 1000.0);
        let n = rng.pick(7) as i32;
        let r = arrondir_decimal(x, n).unwrap();

        // au plus n décimales
        let d = DecimalExact::depuis_f64(r).unwrap();
        assert!(d.echelle() <= n as usize, "x={x} n={n} r={r}");

        // à moins d’une demi-unité (marge pour la relecture binaire)
        let demi = 0.5 * 10f64.powi(-n);
        assert!((r - x).abs() <= demi + 1e-12, "x={x} n={n} r={r}");

        // idempotent
        assert_eq!(arrondir_decimal(r, n).unwrap(), r);
    }
}

#[test]
fn fuzz_safe_format_aligne() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xF0F0_u64);

    for _ in 0..1000 {
        budget(t0, max);

        let v = rng.reel(-1e4, 1e4);
        let u = 10f64.powf(rng.reel(-7.0, 4.0));
        let f = formater_resultat(v, u);

        let d_u = decimales_implicites(&f.incertitude)
            .unwrap_or_else(|| panic!("incertitude illisible: {f}"));
        let d_v = f.valeur.split_once('.').map(|(_, x)| x.len()).unwrap_or(0);
        assert_eq!(d_u, d_v, "v={v} u={u} -> {f}");

        // exactement 2 chiffres significatifs dans la mantisse
        let mantisse = f.incertitude.split(['e', 'E']).next().unwrap_or("");
        let significatifs = mantisse
            .chars()
            .filter(char::is_ascii_digit)
            .skip_while(|c| *c == '0')
            .count();
        assert_eq!(significatifs, 2, "u={u} -> {}", f.incertitude);
    }
}

#[test]
fn fuzz_safe_saisie_quelconque() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let alphabet: Vec<char> = "x12.e+-*/^(),pisqrtlog π√ E".chars().collect();
    let mut rng = Rng::new(0xDEAD_u64);

    let mut vus_ok = 0usize;
    let mut vus_err = 0usize;

    for _ in 0..800 {
        budget(t0, max);

        let len = rng.pick(12) as usize + 1;
        let s: String = (0..len)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        match analyser(&s) {
            Ok(_) => vus_ok += 1,
            Err(ErreurIncertitude::ExpressionInvalide(msg)) => {
                assert!(!msg.is_empty(), "diagnostic vide pour {s:?}");
                vus_err += 1;
            }
            Err(ErreurIncertitude::ExpressionVide) => vus_err += 1,
            Err(autre) => panic!("erreur non attendue: expr={s:?} err={autre}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(vus_ok > 10, "trop peu de succès: {vus_ok}");
    assert!(vus_err > 10, "trop peu d’erreurs: {vus_err}");
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("x1", 512);
    let v = point(0.5, 0.0);
    let u = point(0.01, 0.0);
    budget(t0, max);

    let r = propager(&expr, &v, &u).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 512·x1
    assert_eq!(r.valeur, 256.0);
    assert!((r.incertitude - 5.12).abs() < 1e-9, "u={}", r.incertitude);
}
