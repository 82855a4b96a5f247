use crate::bookings::dto::BookingRequest;
use crate::error::{ApiError, ApiResult};

/// Date-range and guest-count checks. The price is accepted as sent by the
/// client; see DESIGN.md on that trade-off.
pub(crate) fn validate_booking(req: &BookingRequest) -> ApiResult<()> {
    if req.check_out <= req.check_in {
        return Err(ApiError::Validation(
            "check_out must be strictly after check_in".into(),
        ));
    }
    if req.number_of_guests < 1 {
        return Err(ApiError::Validation(
            "number_of_guests must be at least 1".into(),
        ));
    }
    if req.price < 0.0 {
        return Err(ApiError::Validation("price must not be negative".into()));
    }
    Ok(())
}
