use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::error::Category;
use tracing::trace;

use crate::data::keyed::{self, Keyed};
use crate::error::{Error, Result};

// Wire shapes. Every level keyed by data is read as ordered (key, value) pairs.

#[derive(Debug, Deserialize)]
struct WireCountry {
    number: RouteNumber,
    #[serde(deserialize_with = "keyed::entries")]
    airports: Keyed<WireAirport>,
}

#[derive(Debug, Deserialize)]
struct WireAirport {
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: String,
    #[serde(rename = "Icao", default)]
    icao: String,
    position: LatLon,
    #[serde(deserialize_with = "keyed::entries")]
    flights: Keyed<WireFlight>,
}

#[derive(Debug, Deserialize)]
struct WireFlight {
    #[serde(rename = "Airline")]
    airline: RouteAirline,
    #[serde(deserialize_with = "keyed::entries")]
    utc: Keyed<WireTime>,
}

#[derive(Debug, Deserialize)]
struct WireTime {
    #[serde(default)]
    aircraft: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    offset: i32,
}

// Flattened records. Each former object key is an explicit field.

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteNumber {
    #[serde(default)]
    pub airports: i64,
    #[serde(default)]
    pub flights: i64,
}

/// Coordinates are kept as the service formats them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLon {
    #[serde(rename = "lat")]
    pub latitude: String,
    #[serde(rename = "lon")]
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteAirline {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iata: String,
    #[serde(default)]
    pub icao: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCountry {
    pub country: String,
    pub number: RouteNumber,
    /// The last airport listed under the country, carrying the flights of every listed airport
    /// in document order; `None` when the country lists no airports.
    pub airport: Option<RouteAirport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteAirport {
    pub iata: String,
    pub name: String,
    pub city: String,
    pub icao: String,
    pub position: LatLon,
    pub flights: Vec<RouteFlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteFlight {
    pub id: String,
    pub airline: RouteAirline,
    /// Wire order, which is not guaranteed to be chronological
    pub utc: Vec<RouteTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteTime {
    pub date: String,
    pub aircraft: String,
    pub time: String,
    pub timestamp: i64,
    pub offset: i32,                    // Seconds east of UTC
}

/// Arrival and departure route trees for one airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRoutes {
    pub arrivals: RouteCountry,
    pub departures: RouteCountry,
}

impl RouteCountry {
    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(route_error)
    }

    fn flatten(country: String, wire: WireCountry) -> Self {
        let listed = wire.airports.len();
        if listed > 1 {
            trace!(%country, listed, "merging listed airports into the last one");
        }

        // The last airport's own fields win, but flights from every listed airport accumulate on it
        let airport = wire.airports.into_iter()
            .map(|(iata, airport)| RouteAirport::flatten(iata, airport))
            .fold(None, |kept: Option<RouteAirport>, mut next| {
                if let Some(mut previous) = kept {
                    previous.flights.append(&mut next.flights);
                    next.flights = previous.flights;
                }
                Some(next)
            });

        Self { country, number: wire.number, airport }
    }
}

impl RouteAirport {
    fn flatten(iata: String, wire: WireAirport) -> Self {
        Self {
            iata,
            name: wire.name,
            city: wire.city,
            icao: wire.icao,
            position: wire.position,
            flights: wire.flights.into_iter()
                .map(|(id, flight)| RouteFlight::flatten(id, flight))
                .collect(),
        }
    }
}

impl RouteFlight {
    fn flatten(id: String, wire: WireFlight) -> Self {
        Self {
            id,
            airline: wire.airline,
            utc: wire.utc.into_iter()
                .map(|(date, t)| RouteTime {
                    date,
                    aircraft: t.aircraft,
                    time: t.time,
                    timestamp: t.timestamp,
                    offset: t.offset,
                })
                .collect(),
        }
    }
}

impl RouteTime {
    pub fn departs_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.timestamp, 0).single()
    }

    /// Scheduled time in the airport's local offset.
    pub fn local_departure(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.offset)?;
        self.departs_at().map(|t| t.with_timezone(&offset))
    }
}

impl AirportRoutes {
    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(route_error)
    }
}

impl<'de> Deserialize<'de> for RouteCountry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut countries: Keyed<WireCountry> = keyed::entries(deserializer)?;

        match countries.len() {
            1 => (),
            0 => return Err(de::Error::custom("route document names no country")),
            n => return Err(de::Error::custom(format!("route document names {} countries, expected one", n))),
        }

        let (country, wire) = countries.remove(0);
        Ok(RouteCountry::flatten(country, wire))
    }
}

// Syntax errors mean the body was never JSON; anything else is a shape problem in the tree
fn route_error(e: serde_json::Error) -> Error {
    match e.classify() {
        Category::Syntax | Category::Eof => Error::Envelope(e.to_string()),
        Category::Data | Category::Io => Error::Structure(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn time(timestamp: i64) -> serde_json::Value {
        json!({"aircraft": "B738", "time": "10:15", "timestamp": timestamp, "offset": -18000})
    }

    fn airport(flights: serde_json::Value) -> serde_json::Value {
        json!({
            "name": "John F. Kennedy International Airport",
            "city": "New York",
            "Icao": "KJFK",
            "position": {"lat": "40.639751", "lon": "-73.778925"},
            "flights": flights
        })
    }

    fn airline() -> serde_json::Value {
        json!({"name": "American Airlines", "iata": "AA", "icao": "AAL", "url": "aa-aal"})
    }

    fn parse(doc: serde_json::Value) -> Result<RouteCountry> {
        RouteCountry::parse(&serde_json::to_vec(&doc).unwrap())
    }

    #[test]
    fn test_keys_become_fields() {
        let country = parse(json!({
            "USA": {
                "number": {"airports": 1, "flights": 1},
                "airports": {
                    "JFK": airport(json!({
                        "AA100": {"Airline": airline(), "utc": {"2024-01-01": time(1704104100)}}
                    }))
                }
            }
        })).unwrap();

        assert_eq!(country.country, "USA");
        assert_eq!(country.number, RouteNumber { airports: 1, flights: 1 });

        let airport = country.airport.expect("airport");
        assert_eq!(airport.iata, "JFK");
        assert_eq!(airport.icao, "KJFK");
        assert_eq!(airport.city, "New York");
        assert_eq!(airport.position.latitude, "40.639751");
        assert_eq!(airport.position.longitude, "-73.778925");
        assert_eq!(airport.flights.len(), 1);

        let flight = &airport.flights[0];
        assert_eq!(flight.id, "AA100");
        assert_eq!(flight.airline.icao, "AAL");
        assert_eq!(flight.utc.len(), 1);
        assert_eq!(flight.utc[0].date, "2024-01-01");
        assert_eq!(flight.utc[0].aircraft, "B738");
        assert_eq!(flight.utc[0].time, "10:15");
        assert_eq!(flight.utc[0].timestamp, 1704104100);
        assert_eq!(flight.utc[0].offset, -18000);
    }

    #[test]
    fn test_last_airport_is_kept_with_all_flights() {
        let mut lax = airport(json!({
            "DL5": {"Airline": {"name": "Delta Air Lines", "iata": "DL", "icao": "DAL", "url": "dl-dal"},
                    "utc": {"2024-01-02": time(1704190500)}}
        }));
        lax["name"] = json!("Los Angeles International Airport");
        lax["city"] = json!("Los Angeles");
        lax["Icao"] = json!("KLAX");
        lax["position"] = json!({"lat": "33.942501", "lon": "-118.407997"});

        let country = parse(json!({
            "USA": {
                "number": {"airports": 2, "flights": 2},
                "airports": {
                    "JFK": airport(json!({"AA100": {"Airline": airline(), "utc": {"2024-01-01": time(1704104100)}}})),
                    "LAX": lax
                }
            }
        })).unwrap();

        let airport = country.airport.expect("airport");
        assert_eq!(airport.iata, "LAX");
        assert_eq!(airport.icao, "KLAX");
        assert_eq!(airport.city, "Los Angeles");
        assert_eq!(airport.position.latitude, "33.942501");

        let ids: Vec<&str> = airport.flights.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["AA100", "DL5"]);
        assert_eq!(airport.flights[0].utc[0].date, "2024-01-01");
        assert_eq!(airport.flights[1].airline.icao, "DAL");
        assert_eq!(country.number.airports, 2);
    }

    #[test]
    fn test_repeated_date_keeps_last_entry() {
        let body = br#"{"USA": {"number": {"airports": 1, "flights": 1}, "airports": {"JFK": {
            "name": "JFK", "city": "New York", "Icao": "KJFK", "position": {"lat": "40.6", "lon": "-73.7"},
            "flights": {"AA100": {"Airline": {"name": "American Airlines", "iata": "AA", "icao": "AAL", "url": ""},
                "utc": {"2024-01-01": {"aircraft": "B738", "time": "10:15", "timestamp": 1, "offset": 0},
                        "2024-01-01": {"aircraft": "A321", "time": "11:40", "timestamp": 2, "offset": 0}}}}}}}}"#;

        let country = RouteCountry::parse(body).unwrap();
        let utc = &country.airport.unwrap().flights[0].utc;
        assert_eq!(utc.len(), 1);
        assert_eq!(utc[0].aircraft, "A321");
        assert_eq!(utc[0].timestamp, 2);
    }

    #[test]
    fn test_empty_flights_is_valid() {
        let country = parse(json!({
            "Germany": {"number": {"airports": 1, "flights": 0}, "airports": {"FRA": airport(json!({}))}}
        })).unwrap();

        let airport = country.airport.unwrap();
        assert_eq!(airport.iata, "FRA");
        assert!(airport.flights.is_empty());
    }

    #[test]
    fn test_no_airports() {
        let country = parse(json!({"Iceland": {"number": {"airports": 0, "flights": 0}, "airports": {}}})).unwrap();
        assert_eq!(country.country, "Iceland");
        assert!(country.airport.is_none());
    }

    #[test]
    fn test_every_utc_entry_is_kept() {
        let country = parse(json!({
            "USA": {
                "number": {"airports": 1, "flights": 1},
                "airports": {"JFK": airport(json!({
                    "AA100": {"Airline": airline(), "utc": {
                        "2024-01-03": time(1704276900),
                        "2024-01-01": time(1704104100),
                        "2024-01-02": time(1704190500)
                    }}
                }))}
            }
        })).unwrap();

        let mut dates: Vec<String> = country.airport.unwrap().flights[0].utc.iter()
            .map(|t| t.date.clone())
            .collect();
        dates.sort();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_structural_mismatch_fails_whole_document() {
        let missing_airline = json!({
            "USA": {"number": {"airports": 1, "flights": 1},
                    "airports": {"JFK": airport(json!({"AA100": {"utc": {}}}))}}
        });
        assert!(matches!(parse(missing_airline), Err(Error::Structure(_))));

        let array_airports = json!({"USA": {"number": {"airports": 0, "flights": 0}, "airports": []}});
        assert!(matches!(parse(array_airports), Err(Error::Structure(_))));

        let numeric_position = json!({
            "USA": {"number": {"airports": 1, "flights": 0},
                    "airports": {"JFK": {"name": "", "city": "", "Icao": "",
                                         "position": {"lat": 40.6, "lon": -73.7}, "flights": {}}}}
        });
        assert!(matches!(parse(numeric_position), Err(Error::Structure(_))));

        assert!(matches!(parse(json!({})), Err(Error::Structure(_))));
        assert!(matches!(parse(json!({"USA": {"number": {}, "airports": {}}, "Canada": {"number": {}, "airports": {}}})),
                         Err(Error::Structure(_))));
        assert!(matches!(parse(json!(["USA"])), Err(Error::Structure(_))));
    }

    #[test]
    fn test_truncated_body_fails() {
        let body = br#"{"USA": {"number": {"airports": 1, "flights": 1}, "airports": {"JFK": {"#;
        assert!(matches!(RouteCountry::parse(body), Err(Error::Envelope(_))));
    }

    #[test]
    fn test_arrivals_and_departures() {
        let body = serde_json::to_vec(&json!({
            "arrivals": {"USA": {"number": {"airports": 1, "flights": 0}, "airports": {"JFK": airport(json!({}))}}},
            "departures": {"Japan": {"number": {"airports": 1, "flights": 0}, "airports": {"HND": airport(json!({}))}}}
        })).unwrap();

        let routes = AirportRoutes::parse(&body).unwrap();
        assert_eq!(routes.arrivals.country, "USA");
        assert_eq!(routes.departures.country, "Japan");
        assert_eq!(routes.departures.airport.unwrap().iata, "HND");
    }

    #[test]
    fn test_local_departure() {
        let t = RouteTime {
            date: "2024-01-01".to_string(), aircraft: "B738".to_string(), time: "05:15".to_string(),
            timestamp: 1704104100, offset: -18000,
        };
        assert_eq!(t.departs_at().unwrap().timestamp(), 1704104100);
        assert_eq!(t.local_departure().unwrap().offset().local_minus_utc(), -18000);
    }
}
