//! Localization - Arabic/French labels, text direction and locale formatting.
//!
//! Labels are looked up by key with [`Language::t`]. Unknown keys fall back to the
//! key itself so a missing translation shows up in the output instead of failing.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// UI language. Arabic is right-to-left, French left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// العربية
    #[default]
    #[serde(rename = "ar")]
    Arabic,
    /// Français
    #[serde(rename = "fr")]
    French,
}

/// Text direction of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Right-to-left
    Rtl,
    /// Left-to-right
    Ltr,
}

impl Direction {
    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rtl => "rtl",
            Self::Ltr => "ltr",
        }
    }

    /// CSS `text-align` value matching the direction.
    #[must_use]
    pub const fn align(self) -> &'static str {
        match self {
            Self::Rtl => "right",
            Self::Ltr => "left",
        }
    }
}

// (key, arabic, french)
const LABELS: &[(&str, &str, &str)] = &[
    ("app_title", "إدارة مدرسة السياقة", "Gestion Auto-école"),
    ("dashboard", "لوحة التحكم", "Tableau de bord"),
    ("students", "المترشحون", "Candidats"),
    ("student", "المترشح", "Candidat"),
    ("instructors", "المدربون", "Moniteurs"),
    ("vehicles", "المركبات", "Véhicules"),
    ("schedule", "جدول الحصص", "Planning"),
    ("weekly_schedule", "الجدول الأسبوعي", "Planning hebdomadaire"),
    ("finance", "المالية", "Finances"),
    ("settings", "الإعدادات", "Paramètres"),
    ("full_name", "الاسم الكامل", "Nom complet"),
    ("address", "العنوان", "Adresse"),
    ("phone_number", "رقم الهاتف", "Téléphone"),
    ("national_id", "رقم البطاقة الوطنية", "CIN"),
    ("license_type", "صنف الرخصة", "Catégorie de permis"),
    ("registration_date", "تاريخ التسجيل", "Date d'inscription"),
    ("status", "الحالة", "Statut"),
    ("balance", "الرصيد", "Solde"),
    ("total_cost", "التكلفة الإجمالية", "Coût total"),
    ("amount_paid", "المبلغ المدفوع", "Montant payé"),
    ("remaining_balance", "المبلغ المتبقي", "Reste à payer"),
    ("status_open_file", "ملف مفتوح", "Dossier ouvert"),
    ("status_in_training", "في التكوين", "En formation"),
    ("status_passed_exam", "اجتاز الامتحان", "Examen passé"),
    ("status_successful", "ناجح", "Réussi"),
    ("status_failed", "راسب", "Échoué"),
    ("vehicle_status_available", "متوفرة", "Disponible"),
    ("vehicle_status_maintenance", "صيانة", "En maintenance"),
    ("vehicle_status_out_of_service", "خارج الخدمة", "Hors service"),
    ("lesson_type_practical", "تطبيقي", "Pratique"),
    ("lesson_type_theoretical", "نظري", "Théorique"),
    ("lesson_status_scheduled", "مجدولة", "Programmée"),
    ("lesson_status_completed", "مكتملة", "Terminée"),
    ("lesson_status_cancelled", "ملغاة", "Annulée"),
    ("category_maintenance", "صيانة", "Entretien"),
    ("category_salaries", "رواتب", "Salaires"),
    ("category_rent", "كراء", "Loyer"),
    ("category_bills", "فواتير", "Factures"),
    ("category_other", "أخرى", "Autre"),
    ("monday", "الإثنين", "Lundi"),
    ("tuesday", "الثلاثاء", "Mardi"),
    ("wednesday", "الأربعاء", "Mercredi"),
    ("thursday", "الخميس", "Jeudi"),
    ("friday", "الجمعة", "Vendredi"),
    ("saturday", "السبت", "Samedi"),
    ("sunday", "الأحد", "Dimanche"),
    ("time", "الوقت", "Heure"),
    ("hire_date", "تاريخ التوظيف", "Date d'embauche"),
    ("assigned_vehicle", "المركبة المخصصة", "Véhicule attribué"),
    ("vehicle_no", "مركبة رقم", "Véhicule n°"),
    ("unassigned", "غير مخصصة", "Non attribué"),
    ("vehicle_type", "النوع", "Type"),
    ("brand", "العلامة", "Marque"),
    ("registration", "رقم التسجيل", "Immatriculation"),
    ("purchase_year", "سنة الشراء", "Année d'achat"),
    ("last_maintenance", "آخر صيانة", "Dernier entretien"),
    ("topic", "الموضوع", "Sujet"),
    ("location", "المكان", "Lieu"),
    ("total_income", "إجمالي المداخيل", "Total des recettes"),
    ("total_expenses", "إجمالي المصاريف", "Total des dépenses"),
    ("net_profit", "صافي الربح", "Bénéfice net"),
    ("payments_income", "الدفعات (المداخيل)", "Paiements (recettes)"),
    ("expenses", "المصاريف", "Dépenses"),
    ("category", "الفئة", "Catégorie"),
    ("amount", "المبلغ", "Montant"),
    ("date", "التاريخ", "Date"),
    ("description", "الوصف", "Description"),
    ("currency", "درهم", "DH"),
    ("deleted_student", "مترشح محذوف", "Candidat supprimé"),
    ("unknown", "غير معروف", "Inconnu"),
    ("payment_receipt", "وصل أداء", "Reçu de paiement"),
    ("school_name", "اسم المدرسة", "Nom de l'école"),
    ("school_address", "عنوان المدرسة", "Adresse de l'école"),
    ("print_date", "تاريخ الطباعة", "Date d'impression"),
    ("received_from", "توصلنا من", "Reçu de"),
    ("amount_of", "مبلغ", "La somme de"),
    ("for_reason", "وذلك مقابل", "Pour"),
    ("on_date", "بتاريخ", "Le"),
    (
        "receipt_footer",
        "شكرا لثقتكم. هذا الوصل دليل على الأداء.",
        "Merci de votre confiance. Ce reçu fait foi de paiement.",
    ),
    ("student_file", "ملف المترشح", "Dossier du candidat"),
    ("personal_information", "المعلومات الشخصية", "Informations personnelles"),
    ("training_information", "معلومات التكوين", "Informations de formation"),
    ("financial_status", "الوضعية المالية", "Situation financière"),
    ("attached_documents", "الوثائق المرفقة", "Documents joints"),
    ("document_name", "اسم الوثيقة", "Nom du document"),
    ("file_name", "اسم الملف", "Nom du fichier"),
    ("upload_date", "تاريخ الرفع", "Date d'ajout"),
    ("no_documents_attached", "لا توجد وثائق مرفقة", "Aucun document joint"),
    (
        "alert_doc_name_file",
        "المرجو إدخال اسم الوثيقة واختيار ملف.",
        "Veuillez saisir le nom du document et choisir un fichier.",
    ),
    ("total_students", "مجموع المترشحين", "Total des candidats"),
    ("active_instructors", "المدربون النشطون", "Moniteurs actifs"),
    ("available_vehicles", "المركبات المتوفرة", "Véhicules disponibles"),
    ("monthly_income", "مداخيل الشهر", "Recettes du mois"),
    ("monthly_income_chart_title", "المداخيل الشهرية", "Recettes mensuelles"),
    ("exam_success_rate", "نسبة النجاح في الامتحان", "Taux de réussite à l'examen"),
    ("language", "اللغة", "Langue"),
    ("settings_saved", "تم حفظ الإعدادات.", "Paramètres enregistrés."),
    ("confirm_delete_student", "هل أنت متأكد من حذف هذا المترشح؟", "Supprimer ce candidat ?"),
    ("confirm_delete_instructor", "هل أنت متأكد من حذف هذا المدرب؟", "Supprimer ce moniteur ?"),
    ("confirm_delete_vehicle", "هل أنت متأكد من حذف هذه المركبة؟", "Supprimer ce véhicule ?"),
    ("confirm_delete_lesson", "هل أنت متأكد من حذف هذه الحصة؟", "Supprimer cette séance ?"),
    ("confirm_delete_payment", "هل أنت متأكد من حذف هذه الدفعة؟", "Supprimer ce paiement ?"),
    ("confirm_delete_expense", "هل أنت متأكد من حذف هذا المصروف؟", "Supprimer cette dépense ?"),
    ("confirm", "تأكيد", "Confirmer"),
    ("cancel", "إلغاء", "Annuler"),
    ("deleted", "تم الحذف.", "Supprimé."),
    ("cancelled", "تم الإلغاء.", "Annulé."),
    ("saved", "تم الحفظ.", "Enregistré."),
    ("not_found", "غير موجود", "Introuvable"),
    ("no_records", "لا توجد بيانات.", "Aucun enregistrement."),
    ("no_lessons", "لا توجد حصص هذا الأسبوع.", "Aucune séance cette semaine."),
    ("specify_field_to_update", "يرجى تحديد حقل واحد على الأقل للتعديل.", "Veuillez indiquer au moins un champ à modifier."),
    ("specify_name_or_address", "يرجى تحديد الاسم أو العنوان.", "Veuillez indiquer un nom ou une adresse."),
    (
        "help_student",
        "إدارة الطلاب:\n`/student add` - تسجيل طالب\n`/student edit` - تعديل بيانات طالب\n`/student delete` - حذف طالب ووثائقه\n`/student list` - عرض الطلاب أو البحث عنهم\n`/student show` - ملف الطالب ورصيده\n`/student print` - ملف قابل للطباعة\n`/student doc_add` / `doc_remove` - إدارة الوثائق المرفقة",
        "Gestion des élèves :\n`/student add` - Inscrire un élève\n`/student edit` - Modifier un élève\n`/student delete` - Supprimer un élève et ses documents\n`/student list` - Lister ou rechercher les élèves\n`/student show` - Dossier et solde d'un élève\n`/student print` - Dossier imprimable\n`/student doc_add` / `doc_remove` - Gérer les documents joints",
    ),
    (
        "help_instructor",
        "إدارة المدربين:\n`/instructor add` - إضافة مدرب\n`/instructor edit` - تعديل بيانات مدرب\n`/instructor delete` - حذف مدرب\n`/instructor list` - عرض المدربين",
        "Gestion des moniteurs :\n`/instructor add` - Ajouter un moniteur\n`/instructor edit` - Modifier un moniteur\n`/instructor delete` - Supprimer un moniteur\n`/instructor list` - Lister les moniteurs",
    ),
    (
        "help_vehicle",
        "إدارة المركبات:\n`/vehicle add` - إضافة مركبة\n`/vehicle edit` - تعديل بيانات مركبة أو حالتها\n`/vehicle delete` - حذف مركبة\n`/vehicle list` - عرض الأسطول",
        "Gestion des véhicules :\n`/vehicle add` - Ajouter un véhicule\n`/vehicle edit` - Modifier un véhicule ou son état\n`/vehicle delete` - Supprimer un véhicule\n`/vehicle list` - Lister le parc",
    ),
    (
        "help_lesson",
        "إدارة الحصص:\n`/lesson add` - برمجة حصة تطبيقية أو نظرية\n`/lesson edit` - تعديل حصة\n`/lesson delete` - حذف حصة",
        "Gestion des séances :\n`/lesson add` - Programmer une séance pratique ou théorique\n`/lesson edit` - Modifier une séance\n`/lesson delete` - Supprimer une séance",
    ),
    (
        "help_payment",
        "الدفعات:\n`/payment add` - تسجيل دفعة\n`/payment edit` - تعديل دفعة\n`/payment delete` - حذف دفعة\n`/payment list` - عرض الدفعات\n`/payment receipt` - وصل قابل للطباعة",
        "Paiements :\n`/payment add` - Enregistrer un paiement\n`/payment edit` - Modifier un paiement\n`/payment delete` - Supprimer un paiement\n`/payment list` - Lister les paiements\n`/payment receipt` - Reçu imprimable",
    ),
    (
        "help_expense",
        "المصاريف:\n`/expense add` - تسجيل مصروف\n`/expense edit` - تعديل مصروف\n`/expense delete` - حذف مصروف\n`/expense list` - عرض المصاريف",
        "Dépenses :\n`/expense add` - Enregistrer une dépense\n`/expense edit` - Modifier une dépense\n`/expense delete` - Supprimer une dépense\n`/expense list` - Lister les dépenses",
    ),
    (
        "help_settings",
        "الإعدادات:\n`/settings show` - الإعدادات الحالية\n`/settings language` - التبديل بين العربية والفرنسية\n`/settings school` - الاسم والعنوان المطبوعان على الوثائق",
        "Paramètres :\n`/settings show` - Paramètres actuels\n`/settings language` - Basculer entre l'arabe et le français\n`/settings school` - Nom et adresse imprimés sur les documents",
    ),
    ("help_student_files", "ملفات الطلاب", "Dossiers des élèves"),
    ("help_documents", "الوثائق المرفقة", "Documents joints"),
    ("help_lessons", "حصص تطبيقية أو نظرية", "Séances pratiques ou théoriques"),
    ("help_weekly_grid", "الجدول الأسبوعي من 08:00 إلى 18:00", "Planning hebdomadaire de 08:00 à 18:00"),
    ("help_finance_summary", "المداخيل والمصاريف وصافي الربح", "Recettes, dépenses et bénéfice net"),
    ("help_dashboard", "الأرقام الرئيسية", "Chiffres clés"),
    ("help_ping", "التحقق من استجابة البوت.", "Vérifie que le bot répond."),
];

impl Language {
    /// Both supported languages, Arabic first.
    pub const ALL: [Self; 2] = [Self::Arabic, Self::French];

    /// ISO 639-1 code used in settings and the HTML `lang` attribute.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Arabic => "ar",
            Self::French => "fr",
        }
    }

    /// Name of the language written in itself.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Arabic => "العربية",
            Self::French => "Français",
        }
    }

    /// Layout direction for this language.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Arabic => Direction::Rtl,
            Self::French => Direction::Ltr,
        }
    }

    /// Looks up a label. Unknown keys are returned unchanged.
    #[must_use]
    pub fn t<'a>(self, key: &'a str) -> &'a str {
        LABELS
            .iter()
            .find(|(k, _, _)| *k == key)
            .map_or_else(
                || {
                    tracing::debug!("Missing translation for key '{key}'");
                    key
                },
                |&(_, ar, fr)| match self {
                    Self::Arabic => ar,
                    Self::French => fr,
                },
            )
    }

    /// Weekday names starting on Monday.
    #[must_use]
    pub fn weekdays(self) -> [&'static str; 7] {
        [
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
            "sunday",
        ]
        .map(|key| self.t(key))
    }

    /// Formats an amount with locale digits and grouping, followed by the currency.
    #[must_use]
    pub fn format_money(self, amount: f64) -> String {
        format!("{} {}", self.format_amount(amount), self.t("currency"))
    }

    /// Formats an amount with locale grouping (`3 500` in French, `٣٬٥٠٠` in Arabic).
    ///
    /// Fractions are kept to two decimals and only shown when non-zero.
    #[must_use]
    pub fn format_amount(self, amount: f64) -> String {
        let negative = amount < 0.0;
        // Cast safety: amounts are school fees and salaries, far below 2^53.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cents = (amount.abs() * 100.0).round() as u64;
        let whole = cents / 100;
        let frac = cents % 100;

        let (group_sep, decimal_sep) = match self {
            Self::Arabic => ('\u{066C}', '\u{066B}'),
            Self::French => ('\u{202F}', ','),
        };

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(ch);
        }
        if frac != 0 {
            grouped.push(decimal_sep);
            grouped.push_str(&format!("{frac:02}"));
        }
        if negative && (whole != 0 || frac != 0) {
            grouped.insert(0, '-');
        }
        self.localize_digits(&grouped)
    }

    /// Formats a date as day/month/year with locale digits.
    #[must_use]
    pub fn format_date(self, date: NaiveDate) -> String {
        let text = match self {
            Self::Arabic => format!("{}/{}/{}", date.day(), date.month(), date.year()),
            Self::French => date.format("%d/%m/%Y").to_string(),
        };
        self.localize_digits(&text)
    }

    /// Replaces ASCII digits with Arabic-Indic digits for Arabic; identity for French.
    #[must_use]
    pub fn localize_digits(self, text: &str) -> String {
        match self {
            Self::French => text.to_string(),
            Self::Arabic => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
                    None => c,
                })
                .collect(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = crate::errors::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ar" | "arabic" | "العربية" => Ok(Self::Arabic),
            "fr" | "french" | "français" | "francais" => Ok(Self::French),
            other => Err(crate::errors::Error::validation(format!(
                "Unsupported language '{other}' (expected 'ar' or 'fr')"
            ))),
        }
    }
}
