// src/params.rs

pub const DEFAULT_OUT_FILE: &str = "agenda.json";

/// Placeholder for fields the page leaves unassigned.
pub const TBA: &str = "TBA";
/// Placeholder for fields that simply do not apply.
pub const NA: &str = "N/A";
/// Speech slot present but no Pathways project line published.
pub const NO_PATHWAYS: &str = "N/A (No Pathways Info)";

pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Google Apps Script web apps behind the club's signup forms.
// Each accepts POST {"options": [...]} and rebuilds its dropdown.
pub const FEEDBACK_FORM: &str =
    "https://script.google.com/macros/s/AKfycbwJvhdu3KwRkSW17tEFxodtYV5ssCn2Wvhtli1M_9N6KHDuz-mmchLFtW2LAdcHw6PNgQ/exec";
pub const SPEAKER_FORM: &str =
    "https://script.google.com/macros/s/AKfycbxUu5xSp9PGSkmJp21XiR6Zh31s_C84S_RqpLunrrqWiGt-AXlg30VBcZz9Ka3SJxUsWw/exec";
pub const EVALUATOR_FORM: &str =
    "https://script.google.com/macros/s/AKfycbzasaenEuAMB_11pQGr23lHVE_j_VSlhhgITDDReQd2MPQ9C0QfSChmX_5ZLlHoadyu/exec";
pub const TABLE_TOPICS_FORM: &str =
    "https://script.google.com/macros/s/AKfycbye3kDgEZcBnyl-bK09cbmRmxFpueFdVi43gQv92EWP8wL1soKtq-B913_F_XhiJOZLAg/exec";
