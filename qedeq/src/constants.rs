pub(crate) const ASCII_ART: &str = r#"
       ┌───────────────────────────────┐
       │   ∀ x ∃ y     { x | φ(x) }    │
       │      q e d e q   c h e c k    │
       └───────────────────────────────┘
"#;
