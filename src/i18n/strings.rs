use super::Language;

/// All localized user-facing strings for a language.
///
/// Strings are raw text; maud escapes them when they are rendered.
#[derive(Debug, Clone)]
pub struct UiStrings {
    // ==================== Navigation ====================
    pub nav_home: &'static str,
    pub nav_about: &'static str,
    pub nav_projects: &'static str,
    pub nav_education: &'static str,
    pub nav_blog: &'static str,
    pub nav_cv: &'static str,

    /// Label of the language toggle link
    pub switch_language: &'static str,

    // ==================== Section Headings ====================
    pub heading_about: &'static str,
    pub heading_experience: &'static str,
    pub heading_education: &'static str,
    pub heading_publications: &'static str,
    pub heading_projects: &'static str,
    pub heading_latest_posts: &'static str,
    pub heading_contact: &'static str,

    // ==================== Blog ====================
    pub blog_title: &'static str,
    pub blog_empty: &'static str,
    pub blog_all_posts: &'static str,
    pub blog_back: &'static str,
    /// Description of the RSS channel
    pub blog_feed_description: &'static str,

    // ==================== Contact Form ====================
    pub contact_intro: &'static str,
    pub form_name: &'static str,
    pub form_email: &'static str,
    pub form_message: &'static str,
    pub form_submit: &'static str,

    pub error_name_required: &'static str,
    pub error_name_too_long: &'static str,
    pub error_email_invalid: &'static str,
    pub error_message_required: &'static str,
    pub error_message_too_long: &'static str,

    /// Flash shown after the message was relayed
    pub flash_contact_success: &'static str,
    /// Flash shown when the mail transport failed; never includes the cause
    pub flash_contact_failure: &'static str,

    /// Subject of the relayed mail
    /// Placeholders: {name}
    pub mail_subject: &'static str,

    // ==================== Errors ====================
    pub not_found_title: &'static str,
    pub not_found_body: &'static str,
    pub server_error_title: &'static str,
    pub server_error_body: &'static str,
    pub back_home: &'static str,

    // ==================== CV ====================
    pub cv_download: &'static str,
    pub cv_present: &'static str,
    /// Link to a project's source repository
    pub project_code: &'static str,
}

impl UiStrings {
    pub fn for_language(language: Language) -> &'static UiStrings {
        match language {
            Language::En => &ENGLISH_STRINGS,
            Language::Es => &SPANISH_STRINGS,
        }
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: UiStrings = UiStrings {
    nav_home: "Home",
    nav_about: "About",
    nav_projects: "Projects",
    nav_education: "Education",
    nav_blog: "Blog",
    nav_cv: "CV (PDF)",
    switch_language: "Ver en español",

    heading_about: "About me",
    heading_experience: "Experience",
    heading_education: "Education",
    heading_publications: "Publications",
    heading_projects: "Projects",
    heading_latest_posts: "Latest posts",
    heading_contact: "Contact",

    blog_title: "Blog",
    blog_empty: "Nothing published yet.",
    blog_all_posts: "All posts",
    blog_back: "Back to the blog",
    blog_feed_description: "Latest articles",

    contact_intro: "Want to get in touch? Leave a message and I'll get back to you.",
    form_name: "Name",
    form_email: "Email",
    form_message: "Message",
    form_submit: "Send",

    error_name_required: "Please enter your name.",
    error_name_too_long: "The name is too long.",
    error_email_invalid: "Please enter a valid email address.",
    error_message_required: "Please write a message.",
    error_message_too_long: "The message is too long.",

    flash_contact_success: "Thanks! Your message has been sent.",
    flash_contact_failure: "Sorry, your message could not be sent. Please try again later.",

    mail_subject: "New contact message from {name}",

    not_found_title: "Page not found",
    not_found_body: "The page you are looking for does not exist.",
    server_error_title: "Something went wrong",
    server_error_body: "The page could not be generated. Please try again later.",
    back_home: "Back to the home page",

    cv_download: "Download CV",
    cv_present: "Present",
    project_code: "Source code",
};

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: UiStrings = UiStrings {
    nav_home: "Inicio",
    nav_about: "Sobre mí",
    nav_projects: "Proyectos",
    nav_education: "Formación",
    nav_blog: "Blog",
    nav_cv: "CV (PDF)",
    switch_language: "View in English",

    heading_about: "Sobre mí",
    heading_experience: "Experiencia",
    heading_education: "Formación",
    heading_publications: "Publicaciones",
    heading_projects: "Proyectos",
    heading_latest_posts: "Últimas entradas",
    heading_contact: "Contacto",

    blog_title: "Blog",
    blog_empty: "Todavía no hay nada publicado.",
    blog_all_posts: "Todas las entradas",
    blog_back: "Volver al blog",
    blog_feed_description: "Últimos artículos",

    contact_intro: "¿Quieres ponerte en contacto? Déjame un mensaje y te responderé.",
    form_name: "Nombre",
    form_email: "Correo electrónico",
    form_message: "Mensaje",
    form_submit: "Enviar",

    error_name_required: "Por favor, escribe tu nombre.",
    error_name_too_long: "El nombre es demasiado largo.",
    error_email_invalid: "Por favor, introduce un correo electrónico válido.",
    error_message_required: "Por favor, escribe un mensaje.",
    error_message_too_long: "El mensaje es demasiado largo.",

    flash_contact_success: "¡Gracias! Tu mensaje ha sido enviado.",
    flash_contact_failure:
        "Lo siento, no se pudo enviar tu mensaje. Por favor, inténtalo más tarde.",

    mail_subject: "Nuevo mensaje de contacto de {name}",

    not_found_title: "Página no encontrada",
    not_found_body: "La página que buscas no existe.",
    server_error_title: "Algo salió mal",
    server_error_body: "No se pudo generar la página. Por favor, inténtalo más tarde.",
    back_home: "Volver al inicio",

    cv_download: "Descargar CV",
    cv_present: "Actualidad",
    project_code: "Código fuente",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_language_picks_matching_table() {
        assert_eq!(UiStrings::for_language(Language::En).nav_home, "Home");
        assert_eq!(UiStrings::for_language(Language::Es).nav_home, "Inicio");
    }

    #[test]
    fn test_mail_subject_placeholder() {
        assert!(ENGLISH_STRINGS.mail_subject.contains("{name}"));
        assert!(SPANISH_STRINGS.mail_subject.contains("{name}"));
    }

    #[test]
    fn test_failure_flash_differs_from_success() {
        for lang in Language::ALL {
            let strings = UiStrings::for_language(lang);
            assert_ne!(strings.flash_contact_success, strings.flash_contact_failure);
            assert!(!strings.flash_contact_failure.is_empty());
        }
    }

    #[test]
    fn test_switch_language_is_written_in_target_language() {
        assert!(ENGLISH_STRINGS.switch_language.contains("español"));
        assert!(SPANISH_STRINGS.switch_language.contains("English"));
    }
}
