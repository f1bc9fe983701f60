use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read {path:?}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed time {value:?} for Stop {stop_id:?} on Trip {trip_id:?}")]
    MalformedTime {
        value: String,
        stop_id: String,
        trip_id: String,
    },

    #[error("No time to interpolate from for Stop {stop_id:?} on Trip {trip_id:?}")]
    MissingTime { stop_id: String, trip_id: String },

    #[error("No such Stop {stop_id:?} referenced by Trip {trip_id:?}")]
    UnknownStop { stop_id: String, trip_id: String },

    #[error("No such Trip {trip_id:?} referenced by stop_times")]
    UnknownTrip { trip_id: String },
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Could not read the delay feed")]
    Io(#[from] std::io::Error),

    #[error("Malformed delay feed")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Could not read label table {path:?}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
