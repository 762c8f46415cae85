//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : sans variable, eval_infix et eval_rpn donnent la même valeur

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::eval::presque_egaux;
use super::jetons::tokenize;
use super::rpn::to_rpn;
use super::eval_expression;

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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(20);
    if rng.coin() {
        format!("{entier}.{}", rng.pick(100))
    } else {
        format!("{entier}")
    }
}

fn gen_atom(rng: &mut Rng, variables: bool) -> String {
    match rng.pick(if variables { 5 } else { 4 }) {
        0 | 1 => gen_nombre(rng),
        2 => "pi".to_string(),
        // négatif : seulement en tête de parenthèse (seule forme unaire admise)
        3 => format!("(-{})", gen_nombre(rng)),
        _ => ["x", "y", "theta"][rng.pick(3) as usize].to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize, variables: bool) -> String {
    if depth == 0 {
        return gen_atom(rng, variables);
    }

    let a = gen_expr(rng, depth - 1, variables);
    match rng.pick(10) {
        0 => gen_atom(rng, variables),
        1 => format!("({a} + {})", gen_expr(rng, depth - 1, variables)),
        2 => format!("{a} - {}", gen_expr(rng, depth - 1, variables)),
        3 => format!("{a} * {}", gen_expr(rng, depth - 1, variables)),
        4 => format!("({a}) / ({})", gen_expr(rng, depth - 1, variables)),
        // exposant borné : évite de n’avoir que des ∞
        5 => format!("({a}) ^ {}", rng.pick(4)),
        6 => format!("sin({a})"),
        7 => format!("cos({a})"),
        8 => format!("log({a})"),
        _ => format!("{a} + {}", gen_expr(rng, depth - 1, variables)),
    }
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

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_equivalence_infixe_postfixe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut non_finis = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4, false);
        let rapport =
            eval_expression(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert!(rapport.variables.is_empty(), "expr={expr:?}");

        let res = rapport
            .resultats
            .unwrap_or_else(|| panic!("évaluation sautée: expr={expr:?}"));
        let a = res.infixe.unwrap_or_else(|e| panic!("infixe expr={expr:?} err={e}"));
        let b = res.postfixe.unwrap_or_else(|e| panic!("postfixe expr={expr:?} err={e}"));
        assert!(presque_egaux(a, b), "expr={expr:?} infixe={a} postfixe={b}");

        if !a.is_finite() {
            non_finis += 1;
        }
    }

    // log(0), x/0... doivent apparaître : sinon le fuzz ne balaye pas ∞/NaN
    assert!(non_finis > 0, "aucun résultat non fini vu");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut r1 = Rng::new(0xBADC0DE_u64);
    let mut r2 = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        let e1 = gen_expr(&mut r1, 3, true);
        let e2 = gen_expr(&mut r2, 3, true);
        assert_eq!(e1, e2);

        let jetons = tokenize(&e1);
        let p1 = to_rpn(&jetons).unwrap_or_else(|e| panic!("expr={e1:?} err={e}"));
        let p2 = to_rpn(&jetons).unwrap_or_else(|e| panic!("expr={e1:?} err={e}"));
        assert_eq!(p1, p2);
    }
}

#[test]
fn fuzz_safe_variables_bloquent_evaluation() {
    let mut rng = Rng::new(0x5EED_u64);
    let mut avec_variables = 0usize;

    for _ in 0..150 {
        let expr = gen_expr(&mut rng, 3, true);
        let rapport =
            eval_expression(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        // invariant clé : variables présentes <=> pas de résultat
        assert_eq!(
            rapport.variables.is_empty(),
            rapport.resultats.is_some(),
            "expr={expr:?}"
        );
        for v in &rapport.variables {
            assert!(rapport.postfixe.contains(v.as_str()), "expr={expr:?}");
        }
        if !rapport.variables.is_empty() {
            avec_variables += 1;
        }
    }

    assert!(avec_variables > 10, "trop peu d’expressions avec variables");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    let rapport = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    let res = rapport.resultats.unwrap_or_else(|| panic!("évaluation sautée"));
    assert_eq!(res.infixe, Ok(400.0));
    assert_eq!(res.postfixe, Ok(400.0));
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    let expr = format!("{}7{}", "(".repeat(2000), ")".repeat(2000));
    let res = eval_expression(&expr).unwrap().resultats.unwrap();
    assert_eq!(res.infixe, Ok(7.0));
    assert_eq!(res.postfixe, Ok(7.0));
}

/* ------------------------ proptest ------------------------ */

proptest! {
    #[test]
    fn jamais_de_panique(s in "[0-9a-z+*/^(). -]{0,40}") {
        // Ok ou Err, mais jamais de panique
        let _ = eval_expression(&s);
    }

    #[test]
    fn equivalence_sur_arithmetique(
        a in 0u32..1000,
        b in 1u32..1000,
        c in 0u32..50,
        op1 in prop::sample::select(vec!['+', '-', '*', '/', '^']),
        op2 in prop::sample::select(vec!['+', '-', '*', '/']),
    ) {
        let expr = format!("{a} {op1} ({b} {op2} {c}) {op2} {a}.5");
        let res = eval_expression(&expr).unwrap().resultats.unwrap();
        let x = res.infixe.unwrap();
        let y = res.postfixe.unwrap();
        prop_assert!(presque_egaux(x, y), "expr={} {} {}", expr, x, y);
    }
}
