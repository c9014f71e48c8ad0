// Diesel table definitions for the encrypted ledger.
//
// The DDL lives in `db::schema_sql`. Snapshot tables carry no primary key
// on disk; the keys declared here only satisfy diesel.

diesel::table! {
    timed_balances (time, currency) {
        time -> BigInt,
        currency -> Text,
        amount -> Text,
        usd_value -> Text,
    }
}

diesel::table! {
    timed_location_data (time, location) {
        time -> BigInt,
        location -> Text,
        usd_value -> Text,
    }
}

diesel::table! {
    timed_unique_data (time) {
        time -> BigInt,
        net_usd -> Text,
    }
}

diesel::table! {
    exchange_credentials (name) {
        name -> Text,
        api_key -> Text,
        api_secret -> Text,
    }
}

diesel::table! {
    blockchain_accounts (blockchain, account) {
        blockchain -> Text,
        account -> Text,
    }
}

diesel::table! {
    eth_tokens (token) {
        token -> Text,
    }
}

diesel::table! {
    current_balances (asset) {
        asset -> Text,
        amount -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    timed_balances,
    timed_location_data,
    timed_unique_data,
    exchange_credentials,
    blockchain_accounts,
    eth_tokens,
    current_balances,
);
