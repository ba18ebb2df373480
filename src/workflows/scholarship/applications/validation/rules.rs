use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::config::DocumentPolicy;
use super::SectionErrors;
use crate::workflows::scholarship::applications::domain::{
    BankDetails, ContactDetails, DocumentKind, DocumentUpload, EducationalDetails,
    PersonalDetails,
};

fn ifsc_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid IFSC pattern"))
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

fn letters_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z ]*$").expect("valid letters pattern"))
}

fn decimal_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(\.\d+)?$").expect("valid decimal pattern"))
}

fn is_digits(value: &str, count: usize) -> bool {
    value.len() == count && value.bytes().all(|byte| byte.is_ascii_digit())
}

fn is_digits_ranged(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.bytes().all(|byte| byte.is_ascii_digit())
}

fn require(errors: &mut SectionErrors, field: &str, value: &str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), message.to_string());
        false
    } else {
        true
    }
}

fn reject(errors: &mut SectionErrors, field: &str, message: &str) {
    errors.insert(field.to_string(), message.to_string());
}

pub fn validate_personal(personal: &PersonalDetails) -> SectionErrors {
    let mut errors = SectionErrors::new();

    require(&mut errors, "name", &personal.name, "Name is required");
    require(&mut errors, "dob", &personal.dob, "Date of birth is required");

    if require(&mut errors, "gender", &personal.gender, "Gender is required") {
        let gender = personal.gender.trim().to_ascii_lowercase();
        if !matches!(gender.as_str(), "male" | "female" | "other") {
            reject(&mut errors, "gender", "Gender must be male, female, or other");
        }
    }

    if require(
        &mut errors,
        "applicationtype",
        &personal.application_type,
        "Application type is required",
    ) {
        let kind = personal.application_type.trim().to_ascii_lowercase();
        if !matches!(kind.as_str(), "fresh" | "renewal") {
            reject(
                &mut errors,
                "applicationtype",
                "Application type must be fresh or renewal",
            );
        }
    }

    if !is_digits(personal.aadhar.trim(), 12) {
        reject(
            &mut errors,
            "aadhar",
            "Aadhar number must be exactly 12 digits",
        );
    }

    if !is_digits(personal.father_phone.trim(), 10) {
        reject(
            &mut errors,
            "fatherPhone",
            "Father's phone number must be exactly 10 digits",
        );
    }
    if !is_digits(personal.student_phone.trim(), 10) {
        reject(
            &mut errors,
            "studentPhone",
            "Student phone number must be exactly 10 digits",
        );
    }

    if let Some(phone) = optional(&personal.mother_phone) {
        if !is_digits(phone, 10) {
            reject(
                &mut errors,
                "motherPhone",
                "Mother's phone number must be exactly 10 digits",
            );
        }
    }
    if let Some(number) = optional(&personal.alternative_number) {
        if !is_digits(number, 10) {
            reject(
                &mut errors,
                "alternativeNumber",
                "Alternative number must be exactly 10 digits",
            );
        }
    }

    if require(
        &mut errors,
        "income",
        &personal.income,
        "Annual income is required",
    ) && !personal.income.trim().bytes().all(|b| b.is_ascii_digit())
    {
        reject(&mut errors, "income", "Income must contain digits only");
    }

    errors
}

pub fn validate_contact(contact: &ContactDetails) -> SectionErrors {
    let mut errors = SectionErrors::new();

    require(&mut errors, "house", &contact.house, "House name is required");
    require(&mut errors, "place", &contact.place, "Place is required");
    require(&mut errors, "country", &contact.country, "Country is required");
    require(
        &mut errors,
        "postOffice",
        &contact.post_office,
        "Post office is required",
    );

    if !is_digits(contact.pincode.trim(), 6) {
        reject(&mut errors, "pincode", "Pincode must be exactly 6 digits");
    }

    if require(&mut errors, "state", &contact.state, "State is required")
        && !letters_pattern().is_match(contact.state.trim())
    {
        reject(&mut errors, "state", "State must contain letters only");
    }
    if require(
        &mut errors,
        "district",
        &contact.district,
        "District is required",
    ) && !letters_pattern().is_match(contact.district.trim())
    {
        reject(&mut errors, "district", "District must contain letters only");
    }

    if !is_digits(contact.whatsapp_number.trim(), 10) {
        reject(
            &mut errors,
            "whatsappNumber",
            "WhatsApp number must be exactly 10 digits",
        );
    }

    if require(
        &mut errors,
        "studentEmail",
        &contact.student_email,
        "Student email is required",
    ) && !email_pattern().is_match(contact.student_email.trim())
    {
        reject(
            &mut errors,
            "studentEmail",
            "Student email must be a valid email address",
        );
    }

    if let Some(number) = optional(&contact.alternative_number) {
        if !is_digits(number, 10) {
            reject(
                &mut errors,
                "alternativeNumber",
                "Alternative number must be exactly 10 digits",
            );
        }
    }

    errors
}

pub fn validate_educational(educational: &EducationalDetails) -> SectionErrors {
    let mut errors = SectionErrors::new();

    require(
        &mut errors,
        "college",
        &educational.college,
        "College is required",
    );
    require(&mut errors, "branch", &educational.branch, "Branch is required");
    require(
        &mut errors,
        "semester",
        &educational.semester,
        "Semester is required",
    );

    if require(&mut errors, "cgpa", &educational.cgpa, "CGPA is required")
        && !decimal_pattern().is_match(educational.cgpa.trim())
    {
        reject(&mut errors, "cgpa", "CGPA must be a decimal number");
    }

    errors
}

pub fn validate_bank(bank: &BankDetails) -> SectionErrors {
    let mut errors = SectionErrors::new();

    if !ifsc_pattern().is_match(bank.ifsc.trim()) {
        reject(
            &mut errors,
            "ifsc",
            "IFSC must be 4 letters, a zero, then 6 alphanumerics",
        );
    }

    require(&mut errors, "bankName", &bank.bank_name, "Bank name is required");
    require(
        &mut errors,
        "branchName",
        &bank.branch_name,
        "Branch name is required",
    );
    require(
        &mut errors,
        "accountHolder",
        &bank.account_holder,
        "Account holder name is required",
    );

    if !is_digits_ranged(bank.account_number.trim(), 9, 18) {
        reject(
            &mut errors,
            "accountNumber",
            "Account number must be 9 to 18 digits",
        );
    }

    errors
}

pub fn validate_documentation(
    documentation: &BTreeMap<DocumentKind, DocumentUpload>,
    policy: &DocumentPolicy,
) -> SectionErrors {
    let mut errors = SectionErrors::new();

    for kind in DocumentKind::ALL {
        match documentation.get(&kind) {
            None => reject(
                &mut errors,
                kind.key(),
                &format!("{} is required", kind.label()),
            ),
            Some(upload) => {
                if !policy.allows_content_type(&upload.content_type) {
                    reject(
                        &mut errors,
                        kind.key(),
                        &format!("{} must be a PDF, JPEG, or PNG file", kind.label()),
                    );
                } else if upload.size_bytes > policy.max_bytes {
                    reject(
                        &mut errors,
                        kind.key(),
                        &format!(
                            "{} exceeds the {} KB size limit",
                            kind.label(),
                            policy.max_bytes / 1024
                        ),
                    );
                }
            }
        }
    }

    errors
}

fn optional(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
}
