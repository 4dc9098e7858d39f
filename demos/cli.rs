use std::env;

use aeris_weather::{
    Client, Envelope, Filter, Offset, ParamKey, ParamValue, Transport, parse_date_like,
};
use chrono::Utc;

/// Apply trailing `key=value` arguments. `from`/`to` accept `YYYYMMDD`,
/// `YYYY-MM-DD` or a day offset like `-1`; anything else is sent as given.
fn apply_extra_params<T: Transport>(api: &mut Client<T>, args: &[String]) {
    let now = Utc::now();
    for (key, value) in args.iter().filter_map(|a| a.split_once('=')) {
        let key = key.trim();
        let parsed = match ParamKey::from_name(key) {
            Some(ParamKey::From | ParamKey::To) => match parse_date_like(value, now) {
                Some(date) => ParamValue::from(date),
                None => ParamValue::parse_auto(value),
            },
            Some(_) => ParamValue::parse_auto(value),
            None => {
                eprintln!("note: `{key}` is not a documented parameter, sending it anyway");
                ParamValue::parse_auto(value)
            }
        };
        api.set_param(key, parsed);
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() == 1 {
        eprintln!(
            "Usage:\n  cargo run --example cli -- closest <endpoint> <place> [key=value...]\n  cargo run --example cli -- batch <place> [key=value...]\n\nExample (closest observation summary):\n  cargo run --example cli -- closest observations/summary 94024\n\nNotes:\n- Credentials are read from AERIS_CLIENT_ID and AERIS_CLIENT_SECRET.\n- This will contact api.aerisapi.com."
        );
        return;
    }

    let mut api = match Client::from_env() {
        Ok(api) => api,
        Err(e) => {
            eprintln!("cannot create client: {e}");
            std::process::exit(2);
        }
    };

    match args.get(1).map(|s| s.as_str()) {
        Some("closest") => {
            let endpoint = args.get(2).cloned().unwrap_or_else(|| "observations".to_string());
            let place = args.get(3).cloned().unwrap_or_else(|| "94024".to_string());

            api.endpoint(endpoint).action("closest").place(place).limit(1);
            apply_extra_params(&mut api, args.get(4..).unwrap_or_default());
            match api.process_as::<Envelope>() {
                Ok(env) => {
                    if let Some(err) = &env.error {
                        eprintln!("{}: {}", err.code, err.description);
                    }
                    println!("{:#}", env.response);
                }
                Err(e) => {
                    eprintln!("request failed: {e}");
                    std::process::exit(1);
                }
            }
        }

        Some("batch") => {
            let place = args
                .get(2)
                .cloned()
                .unwrap_or_else(|| "-45.039948,168.695312".to_string());

            api.action("closest").place(place).limit(1).filter(Filter::AllStations);
            apply_extra_params(&mut api, args.get(3..).unwrap_or_default());
            let queued = api
                .batch("observations,observations/summary")
                .and_then(|api| api.limit(7).filter("day").batch("forecasts"))
                .and_then(|api| {
                    api.limit(24).filter("1hr").from(Offset::hours(-1)).batch("forecasts")
                });
            if let Err(e) = queued {
                eprintln!("cannot queue batch: {e}");
                std::process::exit(2);
            }

            match api.process_as::<Envelope>() {
                Ok(env) => match env.batch() {
                    Ok(batch) => {
                        for sub in batch.responses {
                            println!("{} success={}", sub.request, sub.success);
                        }
                    }
                    Err(e) => eprintln!("unexpected batch body: {e}"),
                },
                Err(e) => {
                    eprintln!("batch failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        _ => {
            eprintln!("Unknown command. Use: closest|batch");
            std::process::exit(2);
        }
    }
}
