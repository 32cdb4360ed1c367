use serde_json::{Value, json};

pub fn portal_self() -> Value {
    json!({
        "id": "0123456789ABCDEF",
        "name": "Test Portal",
        "urlKey": "test"
    })
}

pub fn search_results(items: &[(&str, &str)]) -> Value {
    let results: Vec<Value> = items
        .iter()
        .map(|(id, title)| {
            json!({
                "id": id,
                "title": title,
                "owner": "tester",
                "type": "Web Map",
                "avgRating": 4.0,
                "numViews": 1200,
                "modified": 1_700_000_000_000i64
            })
        })
        .collect();

    json!({
        "total": results.len(),
        "start": 1,
        "num": 20,
        "nextStart": -1,
        "results": results
    })
}

pub fn web_map(layer_title: &str) -> Value {
    json!({
        "version": "2.31",
        "operationalLayers": [
            { "id": "layer-0", "title": layer_title, "layerType": "ArcGISFeatureLayer" }
        ],
        "baseMap": {
            "title": "Light Gray Canvas",
            "baseMapLayers": [ { "id": "World_Light_Gray_Base", "layerType": "ArcGISTiledMapServiceLayer" } ]
        },
        "spatialReference": { "wkid": 102100, "latestWkid": 3857 }
    })
}

pub fn portal_error(code: i64, message: &str) -> Value {
    json!({ "error": { "code": code, "message": message, "details": [] } })
}
