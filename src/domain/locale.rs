use crate::domain::contact::ContactScheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
    Kz,
}

pub const LOCALES: [Locale; 3] = [Locale::Ru, Locale::En, Locale::Kz];

/// Call-to-action copy the intake form cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtaLabels {
    pub submit: &'static str,
    pub sending: &'static str,
    pub done: &'static str,
    pub invalid_email: &'static str,
    pub invalid_contact: &'static str,
}

impl CtaLabels {
    pub fn invalid_for(&self, scheme: ContactScheme) -> &'static str {
        match scheme {
            ContactScheme::Email => self.invalid_email,
            ContactScheme::Handle => self.invalid_contact,
        }
    }
}

const RU_CTA: CtaLabels = CtaLabels {
    submit: "Попробовать",
    sending: "Отправка…",
    done: "Готово!",
    invalid_email: "Вы ввели некорректную почту",
    invalid_contact: "Укажите @ник или ссылку на профиль",
};

const EN_CTA: CtaLabels = CtaLabels {
    submit: "Try",
    sending: "Sending…",
    done: "Done!",
    invalid_email: "Invalid email",
    invalid_contact: "Enter an @handle or a profile link",
};

const KZ_CTA: CtaLabels = CtaLabels {
    submit: "Қатысу",
    sending: "Жіберілуде…",
    done: "Дайын!",
    invalid_email: "Жарамсыз пошта",
    invalid_contact: "@лақап атыңызды немесе профиль сілтемесін енгізіңіз",
};

impl Locale {
    pub fn parse(code: &str) -> Option<Locale> {
        match code {
            "ru" => Some(Locale::Ru),
            "en" => Some(Locale::En),
            "kz" => Some(Locale::Kz),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::En => "en",
            Locale::Kz => "kz",
        }
    }

    pub fn cta(&self) -> &'static CtaLabels {
        match self {
            Locale::Ru => &RU_CTA,
            Locale::En => &EN_CTA,
            Locale::Kz => &KZ_CTA,
        }
    }
}
