//! Spreadsheet-script endpoint
//!
//! Every remote operation is one URL selected by an `action` query parameter.
//! Reads are GETs with extra query parameters, writes are form-encoded POSTs.
//! Both answer JSON; `{"success": false, "error": "..."}` signals a script-level
//! failure.

mod client;

pub use client::{
    check_envelope, form_fields, SheetClient, SheetClientExt, SheetError, SheetHttpClient,
};

/// Action discriminators understood by the script
pub mod actions {
    pub const GET_ADS: &str = "getAds";
    pub const POST_AD: &str = "postAd";
    pub const UPDATE_AD: &str = "updateAd";
    pub const DELETE_AD: &str = "deleteAd";

    pub const GET_COMPLAINTS: &str = "getComplaints";
    pub const POST_COMPLAINT: &str = "postComplaint";
    pub const UPDATE_COMPLAINT: &str = "updateComplaint";
    pub const UPDATE_COMPLAINT_STATUS: &str = "updateComplaintStatus";
    pub const DELETE_COMPLAINT: &str = "deleteComplaint";

    pub const GET_MANAGEMENT_POSTS: &str = "getManagementPosts";
    pub const POST_MANAGEMENT_POST: &str = "postManagementPost";
    pub const UPDATE_MANAGEMENT_POST: &str = "updateManagementPost";
    pub const DELETE_MANAGEMENT_POST: &str = "deleteManagementPost";
    pub const GET_MANAGEMENT_PASSWORD: &str = "getManagementPassword";
    pub const SET_MANAGEMENT_PASSWORD: &str = "setManagementPassword";

    pub const GET_EMERGENCY_CONTACTS: &str = "getEmergencyContacts";
    pub const POST_EMERGENCY_CONTACT: &str = "postEmergencyContact";
    pub const RATE_EMERGENCY_CONTACT: &str = "rateEmergencyContact";

    pub const GET_MART_STATUS: &str = "getMartStatus";
    pub const UPDATE_MART_STATUS: &str = "updateMartStatus";
}
