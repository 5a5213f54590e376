//! Resource usages split across two external namespaces.
//!
//! Every triple uses one internal subject. `alpha` is used 10 times and `beta`
//! 30 times, so AG = (30/40) / (10/40) = 3 and CP = 40 / (20 + 40).

/// Twenty triples, no built-in vocabulary.
pub const NAMESPACES: &str = r#"
@prefix :      <http://example.org/ns#> .
@prefix alpha: <http://example.com/alpha#> .
@prefix beta:  <http://example.com/beta#> .

:a0 alpha:p0 beta:x0 .
:a1 alpha:p1 beta:x1 .
:a2 alpha:p2 beta:x2 .
:a3 alpha:p3 beta:x3 .
:a4 alpha:p4 beta:x4 .
:a5 alpha:p5 beta:x5 .
:a6 alpha:p6 beta:x6 .
:a7 alpha:p7 beta:x7 .
:a8 alpha:p8 beta:x8 .
:a9 alpha:p9 beta:x9 .
:b0 beta:q0 beta:y0 .
:b1 beta:q1 beta:y1 .
:b2 beta:q2 beta:y2 .
:b3 beta:q3 beta:y3 .
:b4 beta:q4 beta:y4 .
:b5 beta:q5 beta:y5 .
:b6 beta:q6 beta:y6 .
:b7 beta:q7 beta:y7 .
:b8 beta:q8 beta:y8 .
:b9 beta:q9 beta:y9 .
"#;
