diesel::table! {
    bookings (booking_id) {
        booking_id -> Int4,
        user_id -> Int4,
        booking_date -> Date,
        slot_time_from -> Text,
        slot_time_to -> Text,
        amount -> Float8,
    }
}

diesel::table! {
    slots (slot_id) {
        slot_id -> Int4,
        slot_date -> Date,
        slot_time -> Text,
        status -> Text,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> Int4,
        name -> Text,
        phone_number -> Text,
        last_booking_date -> Nullable<Date>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(bookings, slots, users);
