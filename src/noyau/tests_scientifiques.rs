//! Tests scientifiques (campagne) : lois connues + tables de référence + limites contrôlées.
//!
//! But : vérifier le noyau contre des résultats de métrologie établis.
//! - propagation : formules analytiques classiques (linéaire, relative, puissance)
//! - arrondi : cas où l’arrondi binaire naïf se trompe
//! - présentation : valeur et incertitude alignées sur les mêmes décimales
//! - stress borné par un budget temps global

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::arrondi::arrondir_decimal;
use super::format::{decimales_implicites, formater_resultat};
use super::formules::{mesure_multiple, Distribution};
use super::propagation::{nom_grandeur, propager, propager_grandeurs, Grandeur};

fn grandeurs(couples: &[(f64, f64)]) -> Vec<Grandeur> {
    couples
        .iter()
        .enumerate()
        .map(|(i, &(v, u))| Grandeur::new(nom_grandeur(i), v, u))
        .collect()
}

fn prop_ok(expr: &str, couples: &[(f64, f64)]) -> (f64, f64) {
    let r = propager_grandeurs(expr, &grandeurs(couples))
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    (r.valeur, r.incertitude)
}

fn assert_proche(obtenu: f64, attendu: f64, ctx: &str) {
    let tol = 1e-12 * attendu.abs().max(1.0);
    assert!(
        (obtenu - attendu).abs() <= tol,
        "{ctx}: obtenu {obtenu}, attendu {attendu}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Lois de propagation ------------------------ */

#[test]
fn sci_propagation_lineaire() {
    // y = 2 x1 - 3 x2 + 5 : u² = (2·0.1)² + (3·0.2)²
    let (y, u) = prop_ok("2*x1 - 3*x2 + 5", &[(1.0, 0.1), (2.0, 0.2)]);
    assert_proche(y, 1.0, "y");
    assert_proche(u, 0.4f64.sqrt(), "u");
}

#[test]
fn sci_propagation_relative_produit_quotient() {
    // y = x1 x2 / x3 : (u/y)² = Σ (uᵢ/xᵢ)²
    let (y, u) = prop_ok("x1*x2/x3", &[(2.0, 0.02), (3.0, 0.03), (4.0, 0.04)]);
    assert_proche(y, 1.5, "y");
    assert_proche(u, 1.5 * 3f64.sqrt() * 0.01, "u");
}

#[test]
fn sci_propagation_loi_puissance() {
    // y = x³ : u = 3x²·u(x)
    let (y, u) = prop_ok("x1**3", &[(2.0, 0.01)]);
    assert_proche(y, 8.0, "y");
    assert_proche(u, 0.12, "u");

    // y = √x : u = u(x) / (2√x)
    let (y, u) = prop_ok("sqrt(x1)", &[(4.0, 0.2)]);
    assert_proche(y, 2.0, "y");
    assert_proche(u, 0.05, "u");
}

#[test]
fn sci_pendule_simple() {
    // g = 4π² L / T²
    let (l, ul, t, ut) = (1.0f64, 0.001f64, 2.0f64, 0.01f64);
    let (g, u) = prop_ok("4*pi^2*x1/x2^2", &[(l, ul), (t, ut)]);

    let g_attendu = 4.0 * std::f64::consts::PI.powi(2) * l / (t * t);
    let rel = ((ul / l).powi(2) + (2.0 * ut / t).powi(2)).sqrt();
    assert_proche(g, g_attendu, "g");
    assert!((u - g_attendu * rel).abs() < 1e-12, "u={u}");
}

#[test]
fn sci_fonctions_transcendantes() {
    // y = sin(x1)·exp(x2)
    let (a, ua, b, ub) = (0.7f64, 0.01f64, 0.3f64, 0.02f64);
    let (y, u) = prop_ok("sin(x1)*exp(x2)", &[(a, ua), (b, ub)]);

    let c1 = a.cos() * b.exp();
    let c2 = a.sin() * b.exp();
    assert_proche(y, a.sin() * b.exp(), "y");
    assert_proche(u, ((c1 * ua).powi(2) + (c2 * ub).powi(2)).sqrt(), "u");
}

#[test]
fn sci_point_critique_premier_ordre() {
    // au minimum de x², la loi du premier ordre donne u = 0
    let (y, u) = prop_ok("x1^2", &[(0.0, 0.5)]);
    assert_eq!(y, 0.0);
    assert_eq!(u, 0.0);
}

#[test]
fn sci_grandeurs_nommees_librement() {
    // les noms ne sont pas limités à x1, x2, ...
    let v: BTreeMap<String, f64> = [("L".to_string(), 2.0), ("l".to_string(), 3.0)].into();
    let u: BTreeMap<String, f64> = [("L".to_string(), 0.3), ("l".to_string(), 0.4)].into();
    let r = propager("L + l", &v, &u).unwrap();
    assert_eq!(r.valeur, 5.0);
    assert_proche(r.incertitude, 0.5, "u");
}

/* ------------------------ Démarche complète ------------------------ */

#[test]
fn sci_mesures_repetees_avec_instrument() {
    // s = √(32/7), u_A = s/√8, u_B = 0.02/√3
    let x = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let m = mesure_multiple(&x, 1.0, 0.02, Distribution::Uniforme).unwrap();
    let r = m.resultat;
    let u_a = (32.0f64 / 7.0).sqrt() / 8f64.sqrt();
    let u_b = 0.02 / 3f64.sqrt();
    assert_eq!(r.valeur, 5.0);
    assert_proche(m.stats.u_a, u_a, "u_A");
    assert_proche(m.u_b, u_b, "u_B");
    assert_proche(r.incertitude, (u_a * u_a + u_b * u_b).sqrt(), "u");

    let f = formater_resultat(r.valeur, r.incertitude);
    assert_eq!((f.valeur.as_str(), f.incertitude.as_str()), ("5.00", "0.76"));
}

/* ------------------------ Arrondi : table de référence ------------------------ */

#[test]
fn sci_arrondi_table() {
    let table: &[(f64, i32, f64)] = &[
        // 2.675 vaut 2.67499999... en binaire ; le texte "2.675" est une vraie moitié
        (2.675, 2, 2.68),
        (1.005, 2, 1.0),
        (0.45, 1, 0.4),
        (0.55, 1, 0.6),
        (-1.25, 1, -1.2),
        (1.2500001, 1, 1.3),
        (0.999, 2, 1.0),
        (123.0, 0, 123.0),
        (0.0, 3, 0.0),
    ];
    for &(x, n, attendu) in table {
        assert_eq!(arrondir_decimal(x, n).unwrap(), attendu, "x={x} n={n}");
    }
}

/* ------------------------ Présentation : table de référence ------------------------ */

#[test]
fn sci_format_table() {
    let table: &[(f64, f64, &str, &str)] = &[
        (3.14159, 0.0012, "3.1416", "0.0012"),
        // moitié exacte au pair
        (9.8765, 0.0234, "9.876", "0.023"),
        (9.8775, 0.0234, "9.878", "0.023"),
        (12345.678, 56.0, "12346", "56"),
        (-2.71828, 0.0047, "-2.7183", "0.0047"),
        (100.0, 0.0, "100.0000", "0.0"),
        (6.02e5, 3400.0, "602000", "3.4e+03"),
    ];
    for &(v, u, vs, us) in table {
        let f = formater_resultat(v, u);
        assert_eq!(
            (f.valeur.as_str(), f.incertitude.as_str()),
            (vs, us),
            "v={v} u={u}"
        );
    }
}

#[test]
fn sci_format_decimales_alignees() {
    for &u in &[0.31, 0.031, 0.0031, 3.1e-6, 3.1, 31.0, 310.0] {
        let f = formater_resultat(1.0 / 3.0, u);
        let d_u = decimales_implicites(&f.incertitude).unwrap();
        let d_v = f.valeur.split_once('.').map(|(_, x)| x.len()).unwrap_or(0);
        assert_eq!(d_u, d_v, "u={u} -> {f}");
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_nombreuses_grandeurs() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // y = x1 + ... + x40 : u = √40 · 0.1
    let n = 40;
    let expr = (0..n).map(nom_grandeur).collect::<Vec<_>>().join(" + ");
    let couples = vec![(1.0, 0.1); n];
    budget(t0, max);

    let (y, u) = prop_ok(&expr, &couples);
    budget(t0, max);

    assert_proche(y, n as f64, "y");
    assert!((u - (n as f64).sqrt() * 0.1).abs() < 1e-12, "u={u}");
}

#[test]
fn sci_stress_polynome_haut_degre() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // y = x^30 en x = 1 : dy/dx = 30
    let (y, u) = prop_ok("x1^30", &[(1.0, 0.001)]);
    budget(t0, max);

    assert_eq!(y, 1.0);
    assert_proche(u, 0.03, "u");
}
