//! User facing message catalog.
//!
//! Every message the flows surface into session state comes from here,
//! keyed on [`Language`]. Backend rejection text is the one exception:
//! when the member API supplies its own message the flow shows it
//! verbatim instead of consulting the catalog.

use sodam_shared::types::Language;

use crate::errors::ValidationError;

pub fn login_id_required(language: Language) -> &'static str {
    match language {
        Language::Korean => "아이디를 입력해주세요.",
        Language::English => "Please enter your login ID.",
    }
}

pub fn phone_required(language: Language) -> &'static str {
    match language {
        Language::Korean => "휴대폰 번호를 입력해주세요.",
        Language::English => "Please enter your mobile phone number.",
    }
}

pub fn phone_format(language: Language) -> &'static str {
    match language {
        Language::Korean => "올바른 휴대폰 번호를 입력해주세요.",
        Language::English => "Please enter a valid mobile phone number.",
    }
}

pub fn email_required(language: Language) -> &'static str {
    match language {
        Language::Korean => "이메일을 입력해주세요.",
        Language::English => "Please enter your email address.",
    }
}

pub fn email_format(language: Language) -> &'static str {
    match language {
        Language::Korean => "올바른 이메일 주소를 입력해주세요.",
        Language::English => "Please enter a valid email address.",
    }
}

pub fn code_required(language: Language) -> &'static str {
    match language {
        Language::Korean => "인증번호를 입력해주세요.",
        Language::English => "Please enter the verification code.",
    }
}

pub fn code_expired(language: Language) -> &'static str {
    match language {
        Language::Korean => "인증번호 입력 시간이 만료되었습니다. 인증번호를 다시 요청해주세요.",
        Language::English => "The verification code has expired. Please request a new one.",
    }
}

pub fn attempts_exhausted(language: Language) -> &'static str {
    match language {
        Language::Korean => "인증 시도 횟수를 초과했습니다. 인증번호를 다시 요청해주세요.",
        Language::English => "Too many failed attempts. Please request a new verification code.",
    }
}

pub fn member_not_found(language: Language) -> &'static str {
    match language {
        Language::Korean => "일치하는 회원 정보를 찾을 수 없습니다.",
        Language::English => "No matching member was found.",
    }
}

pub fn token_missing(language: Language) -> &'static str {
    match language {
        Language::Korean => "인증 결과를 확인할 수 없습니다. 잠시 후 다시 시도해주세요.",
        Language::English => "Could not confirm the verification result. Please try again shortly.",
    }
}

pub fn request_failed(language: Language) -> &'static str {
    match language {
        Language::Korean => "요청을 처리하지 못했습니다. 잠시 후 다시 시도해주세요.",
        Language::English => "The request could not be completed. Please try again shortly.",
    }
}

pub fn server_error(language: Language) -> &'static str {
    match language {
        Language::Korean => "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
        Language::English => "A server error occurred. Please try again shortly.",
    }
}

pub fn password_format(language: Language) -> &'static str {
    match language {
        Language::Korean => "비밀번호는 8~20자의 영문, 숫자, 특수문자를 모두 포함해야 합니다.",
        Language::English => {
            "Password must be 8-20 characters and include letters, digits and special characters."
        }
    }
}

pub fn password_mismatch(language: Language) -> &'static str {
    match language {
        Language::Korean => "비밀번호가 일치하지 않습니다.",
        Language::English => "Passwords do not match.",
    }
}

pub fn agreements_required(language: Language) -> &'static str {
    match language {
        Language::Korean => "필수 약관에 동의해주세요.",
        Language::English => "Please accept the required agreements.",
    }
}

pub fn invalid_reset_link(language: Language) -> &'static str {
    match language {
        Language::Korean => "유효하지 않은 접근입니다. 처음부터 다시 시도해주세요.",
        Language::English => "This link is not valid. Please start over.",
    }
}

/// Message for a local validation failure
pub fn for_validation(error: &ValidationError, language: Language) -> &'static str {
    match error {
        ValidationError::LoginIdRequired => login_id_required(language),
        ValidationError::PhoneRequired => phone_required(language),
        ValidationError::InvalidPhoneFormat { .. } => phone_format(language),
        ValidationError::EmailRequired => email_required(language),
        ValidationError::InvalidEmailFormat => email_format(language),
        ValidationError::CodeRequired => code_required(language),
        ValidationError::InvalidPasswordFormat => password_format(language),
        ValidationError::PasswordMismatch => password_mismatch(language),
        ValidationError::AgreementsRequired => agreements_required(language),
        ValidationError::TokenMissing => invalid_reset_link(language),
    }
}
