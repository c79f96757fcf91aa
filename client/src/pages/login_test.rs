use super::*;

#[test]
fn submit_label_reflects_busy_state() {
    assert_eq!(submit_label(false), "Se connecter");
    assert_eq!(submit_label(true), "Connexion en cours...");
}

#[test]
fn password_visibility_toggles_input_type() {
    assert_eq!(password_input_type(false), "password");
    assert_eq!(password_input_type(true), "text");
    assert_eq!(password_toggle_label(false), "Afficher");
    assert_eq!(password_toggle_label(true), "Masquer");
}
